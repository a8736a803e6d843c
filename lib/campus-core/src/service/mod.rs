pub mod entity_list;
pub mod error;
pub mod selection;

#[cfg(test)]
pub(crate) mod test_utilities;
