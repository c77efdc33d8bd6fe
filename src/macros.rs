// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Any single expression: literals, consts, or vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}
