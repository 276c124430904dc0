use crate::object::{EvalError, Object, Result};
use std::collections::HashMap;
use std::rc::Rc;

pub type Builtin = fn(Vec<Object>) -> Result<Object>;

fn expect_arity(args: &[Object], want: usize) -> Result<()> {
    if args.len() != want {
        Err(EvalError::IncorrectArity {
            got: args.len(),
            want,
        })
    } else {
        Ok(())
    }
}

fn expect_array(fn_name: &'static str, arg: Object) -> Result<Rc<Vec<Object>>> {
    match arg {
        Object::Array(a) => Ok(a),
        obj => Err(EvalError::WrongArgType {
            fn_name,
            want: "ARRAY",
            type_name: obj.type_name(),
        }),
    }
}

fn len(args: Vec<Object>) -> Result<Object> {
    expect_arity(&args, 1)?;

    match args.into_iter().next().unwrap() {
        Object::Array(a) => Ok(Object::Integer(a.len() as i64)),
        Object::String(s) => Ok(Object::Integer(s.len() as i64)),
        obj => Err(EvalError::UnsupportedArgType {
            fn_name: "len",
            type_name: obj.type_name(),
        }),
    }
}

fn first(args: Vec<Object>) -> Result<Object> {
    expect_arity(&args, 1)?;

    let array = expect_array("first", args.into_iter().next().unwrap())?;
    Ok(array.first().cloned().unwrap_or_default())
}

fn last(args: Vec<Object>) -> Result<Object> {
    expect_arity(&args, 1)?;

    let array = expect_array("last", args.into_iter().next().unwrap())?;
    Ok(array.last().cloned().unwrap_or_default())
}

fn rest(args: Vec<Object>) -> Result<Object> {
    expect_arity(&args, 1)?;

    let array = expect_array("rest", args.into_iter().next().unwrap())?;
    if array.is_empty() {
        Ok(Object::Null)
    } else {
        Ok(array[1..].to_vec().into())
    }
}

fn push(args: Vec<Object>) -> Result<Object> {
    expect_arity(&args, 2)?;

    let mut args_iter = args.into_iter();
    let array = expect_array("push", args_iter.next().unwrap())?;

    // A fresh array every time; the argument is left alone.
    let mut appended = array.as_ref().clone();
    appended.push(args_iter.next().unwrap());
    Ok(appended.into())
}

fn puts(args: Vec<Object>) -> Result<Object> {
    for arg in args.iter() {
        println!("{}", arg);
    }
    Ok(Object::Null)
}

thread_local! {
    pub static BUILTINS: HashMap<String, Object> = vec![
        ("len".to_owned(), Object::Builtin(len)),
        ("first".to_owned(), Object::Builtin(first)),
        ("last".to_owned(), Object::Builtin(last)),
        ("rest".to_owned(), Object::Builtin(rest)),
        ("push".to_owned(), Object::Builtin(push)),
        ("puts".to_owned(), Object::Builtin(puts)),
    ]
    .into_iter()
    .collect();
}
