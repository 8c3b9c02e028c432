use super::split_at_positional;
use crate::command_line::{RubyArgs, SubArgs};
use crate::errors::{ParseError, ParseResult};
use tracing::trace;

/// Index of the first argument that is not a flag, a flag's value or an assignment.
///
/// Flags are assumed to consume exactly one following value.
pub(super) fn find_positional<S: AsRef<str>>(args: &[S]) -> Option<usize> {
    let mut prev_arg_is_flag = false;

    for (index, arg) in args.iter().enumerate() {
        let arg = arg.as_ref();
        let has_flag_prefix = arg.starts_with('-');
        let is_assignment = arg.contains('=');
        let should_skip_arg = prev_arg_is_flag || has_flag_prefix || is_assignment;

        if !should_skip_arg {
            trace!(index, arg, "accepted positional argument");
            return Some(index);
        }

        prev_arg_is_flag = has_flag_prefix;
    }

    None
}

pub(super) fn extract_sub<S: AsRef<str>>(args: &[S]) -> ParseResult<SubArgs> {
    let index = find_positional(args).ok_or(ParseError::CommandNotFound)?;
    let (command, args) = split_at_positional(args, index);
    Ok(SubArgs { command, args })
}

pub(super) fn extract_ruby<S: AsRef<str>>(args: &[S]) -> ParseResult<RubyArgs> {
    let index = find_positional(args).ok_or(ParseError::ScriptNotFound)?;
    let (file_path, args) = split_at_positional(args, index);
    Ok(RubyArgs { file_path, args })
}
