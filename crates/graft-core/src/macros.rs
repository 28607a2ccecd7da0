/// Builds a [`ValueRecord`](crate::stmt::ValueRecord) from `name => value`
/// pairs, preserving their order.
#[macro_export]
macro_rules! record {
    () => {
        $crate::stmt::ValueRecord::new()
    };
    ( $( $name:expr => $value:expr ),+ $(,)? ) => {
        <$crate::stmt::ValueRecord as ::core::iter::FromIterator<(String, $crate::stmt::Value)>>::from_iter([
            $( (::std::string::String::from($name), $crate::stmt::Value::from($value)) ),+
        ])
    };
}

/// Builds a [`Value::List`](crate::stmt::Value::List) from its items.
#[macro_export]
macro_rules! list {
    ( $( $value:expr ),* $(,)? ) => {
        $crate::stmt::Value::List($crate::stmt::ValueList::from_vec(vec![
            $( $crate::stmt::Value::from($value) ),*
        ]))
    };
}
