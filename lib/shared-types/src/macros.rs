/// Implements [`std::str::FromStr`], [`std::fmt::Display`], [`std::convert::From`] and [`std::convert::Into`] for a newtype that wraps an Uuid
macro_rules! impls_for_uuid_newtype {
    ($newtype: ty) => {
        impl std::str::FromStr for $newtype {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.parse()?;

                Ok(Self(s))
            }
        }

        impl std::cmp::PartialEq<uuid::Uuid> for $newtype {
            fn eq(&self, other: &uuid::Uuid) -> bool {
                self.0.eq(other)
            }
        }

        impl $newtype {
            pub fn new_v4() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        $crate::macros::impl_display!($newtype);
        $crate::macros::impl_from!($newtype; uuid::Uuid);
        $crate::macros::impl_into!($newtype; uuid::Uuid);
    };
}
pub(crate) use impls_for_uuid_newtype;

/// Implements [`std::fmt::Display`] for a newtype, assuming that the inner type implements Display.
macro_rules! impl_display {
    ($newtype: ty) => {
        impl std::fmt::Display for $newtype {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}
pub(crate) use impl_display;

/// Implements [`std::convert::From`]
macro_rules! impl_from {
    ($newtype: ty; $inner: ty) => {
        impl std::convert::From<$inner> for $newtype {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }
    };
}
pub(crate) use impl_from;

/// Implements [`std::convert::Into`]
macro_rules! impl_into {
    ($newtype: ty; $inner: ty) => {
        impl std::convert::From<$newtype> for $inner {
            fn from(value: $newtype) -> Self {
                value.0.into()
            }
        }
    };
}
pub(crate) use impl_into;
