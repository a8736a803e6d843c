pub mod academic_year;
pub mod branch;
pub mod class_fee_mapping;
pub mod common;
pub mod department;
pub mod designation;
pub mod division;
pub mod entity;
pub mod exam_cycle;
pub mod fee_group;
pub mod fee_head;
pub mod list_query;
pub mod organisation;
pub mod stream;
pub mod student_enrollment;

#[cfg(test)]
mod test;
