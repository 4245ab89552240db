//! bridge::methods
//!
//! The static method table of a bridged commit.
//!
//! The table is fixed at compile time. A name that is not in it (for
//! example `message_short=` or `time=`) has no binding at all, so calling
//! it fails with [`BridgeError::NoMethod`] rather than reaching the commit.
//!
//! | Method | Arity | Access |
//! |---|---|---|
//! | `message` / `message=` | 0 / 1 | read / write |
//! | `message_short` | 0 | read |
//! | `time` | 0 | read |
//! | `committer` / `committer=` | 0 / 1 | read / write |
//! | `author` / `author=` | 0 / 1 | read / write |
//! | `tree` / `tree=` | 0 / 1 | read / write |
//! | `parents` | 0 | read |
//! | `id` | 0 | read |
//! | `write` | 0 | write |
//!
//! Construction (`initialize`) takes a variable argument list and lives on
//! [`Commit::construct`].

use super::{BridgeError, Value};
use crate::object::Commit;

/// Whether a method only reads or also mutates the commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

/// Bound operation behind a method name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Message,
    SetMessage,
    MessageShort,
    Time,
    Committer,
    SetCommitter,
    Author,
    SetAuthor,
    Tree,
    SetTree,
    Parents,
    Id,
    Write,
}

/// One row of the method table.
#[derive(Debug, Clone, Copy)]
pub struct MethodDef {
    pub name: &'static str,
    pub arity: usize,
    pub access: Access,
    pub method: Method,
}

const fn def(name: &'static str, arity: usize, access: Access, method: Method) -> MethodDef {
    MethodDef {
        name,
        arity,
        access,
        method,
    }
}

/// Every method a bridged commit responds to.
pub const METHODS: &[MethodDef] = &[
    def("message", 0, Access::Read, Method::Message),
    def("message=", 1, Access::Write, Method::SetMessage),
    def("message_short", 0, Access::Read, Method::MessageShort),
    def("time", 0, Access::Read, Method::Time),
    def("committer", 0, Access::Read, Method::Committer),
    def("committer=", 1, Access::Write, Method::SetCommitter),
    def("author", 0, Access::Read, Method::Author),
    def("author=", 1, Access::Write, Method::SetAuthor),
    def("tree", 0, Access::Read, Method::Tree),
    def("tree=", 1, Access::Write, Method::SetTree),
    def("parents", 0, Access::Read, Method::Parents),
    def("id", 0, Access::Read, Method::Id),
    def("write", 0, Access::Write, Method::Write),
];

/// Find a method by name.
pub fn lookup_method(name: &str) -> Option<&'static MethodDef> {
    METHODS.iter().find(|m| m.name == name)
}

/// Invoke `name` on `commit` with dynamically typed arguments.
///
/// Setters return [`Value::Nil`].
///
/// # Errors
///
/// - [`BridgeError::NoMethod`] if `name` is not in [`METHODS`]
/// - [`BridgeError::Arity`] if `args` has the wrong length
/// - [`BridgeError::TypeMismatch`] if an argument has the wrong shape
///
/// # Example
///
/// ```ignore
/// use commitbridge::bridge::{dispatch, Value};
///
/// dispatch(&mut commit, "message=", &[Value::from("initial commit")])?;
/// let message = dispatch(&mut commit, "message", &[])?;
/// assert_eq!(message.expect_str()?, "initial commit");
/// ```
pub fn dispatch(commit: &mut Commit, name: &str, args: &[Value]) -> Result<Value, BridgeError> {
    let def = lookup_method(name).ok_or_else(|| BridgeError::NoMethod {
        name: name.to_string(),
    })?;

    if args.len() != def.arity {
        return Err(BridgeError::Arity {
            name: name.to_string(),
            expected: def.arity.to_string(),
            given: args.len(),
        });
    }

    match def.method {
        Method::Message => Ok(Value::from(commit.message())),
        Method::SetMessage => {
            let message = args[0].expect_str()?;
            commit.set_message(message);
            Ok(Value::Nil)
        }
        Method::MessageShort => Ok(Value::from(commit.message_short())),
        Method::Time => Ok(Value::from(commit.time())),
        Method::Committer => Ok(Value::from(commit.committer().cloned())),
        Method::SetCommitter => {
            let person = args[0].expect_person()?;
            commit.set_committer(&person);
            Ok(Value::Nil)
        }
        Method::Author => Ok(Value::from(commit.author().cloned())),
        Method::SetAuthor => {
            let person = args[0].expect_person()?;
            commit.set_author(&person);
            Ok(Value::Nil)
        }
        Method::Tree => Ok(Value::from(commit.tree()?)),
        Method::SetTree => {
            match &args[0] {
                Value::Object(object) => commit.set_tree(object)?,
                other => commit.set_tree_id(&other.expect_oid()?)?,
            }
            Ok(Value::Nil)
        }
        Method::Parents => Ok(Value::from(commit.parents()?)),
        Method::Id => Ok(Value::from(commit.id().map(|oid| oid.to_string()))),
        Method::Write => Ok(Value::from(commit.write()?.to_string())),
    }
}
