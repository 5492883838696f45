// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use crate::errors::*;` to get access to everything `error_chain!` creates.
error_chain! {

    foreign_links {
        Io(::std::io::Error);
    }

    errors {
        InvalidDimensions(width: usize, height: usize) {
            description("invalid maze dimensions")
            display("invalid maze dimensions {}x{}, both must be at least 1", width, height)
        }
        InvalidConfiguration(field: &'static str, reason: String) {
            description("invalid maze configuration")
            display("invalid maze configuration `{}`: {}", field, reason)
        }
    }
}
