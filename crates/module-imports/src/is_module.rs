//! Module form classification.

use crate::ImportError;
use jsx_ast::Program;

/// Returns true if `program` is an ES module, false if it is a script.
///
/// Any other source type cannot be transformed.
pub fn is_module(program: &Program) -> Result<bool, ImportError> {
    match program.source_type.as_str() {
        "module" => Ok(true),
        "script" => Ok(false),
        other => Err(ImportError::UnknownSourceType {
            source_type: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_and_script() {
        assert_eq!(is_module(&Program::module(Vec::new())), Ok(true));
        assert_eq!(is_module(&Program::script(Vec::new())), Ok(false));
    }

    #[test]
    fn test_unknown_source_type() {
        let mut program = Program::module(Vec::new());
        program.source_type = "unambiguous".into();
        let err = is_module(&program).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown sourceType \"unambiguous\", cannot transform."
        );
    }
}
