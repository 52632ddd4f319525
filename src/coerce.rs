//! Container coercion helpers: singletons vs. sequences, map merging and
//! values that may be given either directly or as a closure.
use std::collections::HashMap;
use std::hash::Hash;

/// Either a single value or a sequence of values.
///
/// Fixed-size arrays convert into `Many`, so `[a, b]` and `vec![a, b]` are
/// treated alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn one(value: T) -> Self {
        OneOrMany::One(value)
    }

    pub fn len(&self) -> usize {
        match self {
            OneOrMany::One(_) => 1,
            OneOrMany::Many(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(v) => vec![v],
            OneOrMany::Many(v) => v,
        }
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(value: Vec<T>) -> Self {
        OneOrMany::Many(value)
    }
}

impl<T, const N: usize> From<[T; N]> for OneOrMany<T> {
    fn from(value: [T; N]) -> Self {
        OneOrMany::Many(Vec::from(value))
    }
}

/// Unwrap a length-1 sequence into its element; anything else stays a sequence.
pub fn maybe_cast_to_scalar<T>(what: Vec<T>) -> OneOrMany<T> {
    match <[T; 1]>::try_from(what) {
        Ok([value]) => OneOrMany::One(value),
        Err(what) => OneOrMany::Many(what),
    }
}

/// Make sure `obj` is a list, wrapping a single value into a one-element list.
pub fn as_list<T>(obj: OneOrMany<T>) -> Vec<T> {
    obj.into_vec()
}

/// Like [`as_list`], but also accepts fixed-size arrays and vectors directly.
pub fn as_tuple_or_list<T, O>(obj: O) -> Vec<T>
where
    O: Into<OneOrMany<T>>,
{
    obj.into().into_vec()
}

/// Shallow merge, later maps overriding earlier ones on shared keys.
pub fn merge_dicts<K, V, I>(dicts: I) -> HashMap<K, V>
where
    K: Eq + Hash,
    I: IntoIterator<Item = HashMap<K, V>>,
{
    dicts.into_iter().fold(HashMap::new(), |mut acc, next| {
        acc.extend(next);
        acc
    })
}

/// A value, or a closure producing one from `A`.
pub enum MaybeCall<'a, A, T> {
    Value(T),
    Call(Box<dyn FnOnce(A) -> T + 'a>),
}

impl<'a, A, T> MaybeCall<'a, A, T> {
    pub fn call<F>(f: F) -> Self
    where
        F: FnOnce(A) -> T + 'a,
    {
        MaybeCall::Call(Box::new(f))
    }
}

impl<'a, A, T> From<T> for MaybeCall<'a, A, T> {
    fn from(value: T) -> Self {
        MaybeCall::Value(value)
    }
}

/// Call `obj` with `args` if it is a closure, otherwise return the value.
pub fn maybe_call<A, T>(obj: MaybeCall<'_, A, T>, args: A) -> T {
    match obj {
        MaybeCall::Value(v) => v,
        MaybeCall::Call(f) => f(args),
    }
}
