/// Row-level impls for scalar targets: the plain type and its `Option`, both reading the
/// first column.
macro_rules! impl_scalar_row {
    ($($t:ty),* $(,)?) => {
        $(
            impl FromDbRow for $t {
                fn from_db_row(row: &DbRow) -> Result<Self, SqlRowMapperError> {
                    from_first_column(row)
                }
            }

            impl FromDbRow for Option<$t> {
                fn from_db_row(row: &DbRow) -> Result<Self, SqlRowMapperError> {
                    from_first_column(row)
                }
            }
        )*
    };
}

/// Positional tuples: element `idx` reads column `idx`.
macro_rules! impl_tuple_row {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: FromRowValue),+> FromDbRow for ($($name,)+) {
            fn from_db_row(row: &DbRow) -> Result<Self, SqlRowMapperError> {
                Ok(($(from_column_at::<$name>(row, $idx)?,)+))
            }
        }
    };
}

/// `FromRowValue` for the integer widths. Floats are accepted only when they hold an
/// integral value inside the target range.
macro_rules! impl_integer_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl FromRowValue for $t {
                fn from_null() -> Self {
                    0
                }

                fn from_present(value: &RowValues) -> Option<Self> {
                    match value {
                        RowValues::Int(i) => <$t>::try_from(*i).ok(),
                        RowValues::Bool(b) => Some(<$t>::from(*b)),
                        RowValues::Float(f) => {
                            integral_float(*f).and_then(|n| <$t>::try_from(n).ok())
                        }
                        _ => None,
                    }
                }

                fn target_name() -> &'static str {
                    stringify!($t)
                }
            }
        )*
    };
}

pub(crate) use impl_integer_value;
pub(crate) use impl_scalar_row;
pub(crate) use impl_tuple_row;
