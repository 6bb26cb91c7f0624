//! Library error types, `Error`, `ErrorKind`, `Result` and `ResultExt` from `error_chain!`.
//!
//! Building, carving and solving never fail. Only restoring stored mazes does.

use error_chain::error_chain;

error_chain! {

    foreign_links {
        Json(::serde_json::Error);
        Io(::std::io::Error);
    }

    errors {
        CellCountMismatch(expected: usize, found: usize) {
            description("stored cell records do not match the grid")
            display("grid has {} cells but {} cell records were given", expected, found)
        }
    }
}
