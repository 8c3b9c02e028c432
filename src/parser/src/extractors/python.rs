use super::split_at_positional;
use crate::command_line::PythonArgs;
use crate::errors::{ParseError, ParseResult};
use tracing::trace;

const MODULE_FLAG: &str = "-m";

/// Like the generic scan, except that the argument following `-m` is always the module name.
fn find_script_or_module<S: AsRef<str>>(args: &[S]) -> Option<usize> {
    let mut prev_arg_is_flag = false;
    let mut module_flag = false;

    for (index, arg) in args.iter().enumerate() {
        let arg = arg.as_ref();
        let has_flag_prefix = arg.starts_with('-');
        let is_assignment = arg.contains('=');
        let should_skip_arg = prev_arg_is_flag || has_flag_prefix || is_assignment;

        if !should_skip_arg || module_flag {
            trace!(index, arg, module_flag, "accepted python script or module");
            return Some(index);
        }

        if arg == MODULE_FLAG {
            module_flag = true;
        }

        prev_arg_is_flag = has_flag_prefix;
    }

    None
}

pub(super) fn extract<S: AsRef<str>>(args: &[S]) -> ParseResult<PythonArgs> {
    let index = find_script_or_module(args).ok_or(ParseError::ScriptOrModuleNotFound)?;
    let (file_path, args) = split_at_positional(args, index);
    Ok(PythonArgs { file_path, args })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::module(vec!["-m", "hello"], "hello", vec![])]
    #[case::module_with_args(vec!["-u", "-m", "http.server", "8000"], "http.server", vec!["8000"])]
    #[case::module_flag_shaped(vec!["-m", "-weird"], "-weird", vec![])]
    #[case::module_assignment_shaped(vec!["-m", "a=b", "c"], "a=b", vec!["c"])]
    #[case::bare_name(vec!["flask", "run", "--host=0.0.0.0"], "flask", vec!["run", "--host=0.0.0.0"])]
    #[case::path(
        vec!["/opt/dogweb/bin/flask", "run", "--host=0.0.0.0", "--without-threads"],
        "/opt/dogweb/bin/flask",
        vec!["run", "--host=0.0.0.0", "--without-threads"]
    )]
    #[case::warning_flag_value(vec!["-W", "ignore", "manage.py", "runserver"], "manage.py", vec!["runserver"])]
    #[case::env_assignment(vec!["PYTHONPATH=.", "app.py"], "app.py", vec![])]
    fn test_extract(
        #[case] args: Vec<&str>,
        #[case] file_path: &str,
        #[case] rest: Vec<&str>,
    ) {
        assert_eq!(
            extract(&args),
            Ok(PythonArgs {
                file_path: file_path.to_string(),
                args: rest.into_iter().map(String::from).collect(),
            })
        );
    }

    #[rstest]
    #[case::empty(vec![])]
    #[case::dangling_module_flag(vec!["-m"])]
    #[case::only_flags(vec!["-u", "-B"])]
    fn test_extract_not_found(#[case] args: Vec<&str>) {
        assert_eq!(extract(&args), Err(ParseError::ScriptOrModuleNotFound));
    }
}
