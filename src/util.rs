pub const INTERNAL_ERROR: &str = "[CRITICAL ERROR] Internal Compiler Error";

const INDENT_WIDTH: usize = 4;

pub fn indentation(level: usize) -> String {
    " ".repeat(level * INDENT_WIDTH)
}
