//! Railway helpers over `std::result::Result`.
//!
//! `Result` is the only success/failure container in the crate: `map`,
//! `and_then` and `?` cover mapping and binding, and `expect`/`expect_err`
//! panic on wrong-variant access. This module adds the sequence operations
//! `Result` lacks: joining several independent validations while reporting
//! the earliest failure.

/// Return the first failure in iteration order, or `Ok(())`.
///
/// Iteration stops at the first `Err`; later results are not inspected.
///
/// # Examples
/// ```
/// use carebridge::domain::railway::combine;
///
/// let checks: [Result<(), &str>; 4] = [Ok(()), Ok(()), Err("first"), Err("second")];
/// assert_eq!(combine(checks), Err("first"));
///
/// let empty: [Result<(), &str>; 0] = [];
/// assert_eq!(combine(empty), Ok(()));
/// ```
pub fn combine<E, I>(results: I) -> Result<(), E>
where
    I: IntoIterator<Item = Result<(), E>>,
{
    results.into_iter().collect()
}

/// Join two independent validations, keeping both values.
///
/// When both fail, the failure of `a` wins.
///
/// # Examples
/// ```
/// use carebridge::domain::railway::zip;
///
/// assert_eq!(zip::<_, _, &str>(Ok(1), Ok("x")), Ok((1, "x")));
/// assert_eq!(zip::<i32, i32, _>(Err("a"), Err("b")), Err("a"));
/// ```
pub fn zip<A, B, E>(a: Result<A, E>, b: Result<B, E>) -> Result<(A, B), E> {
    match (a, b) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (Err(error), _) | (Ok(_), Err(error)) => Err(error),
    }
}

/// Three-way [`zip`]; failures are reported in argument order.
pub fn zip3<A, B, C, E>(
    a: Result<A, E>,
    b: Result<B, E>,
    c: Result<C, E>,
) -> Result<(A, B, C), E> {
    let ((a, b), c) = zip(zip(a, b), c)?;
    Ok((a, b, c))
}
