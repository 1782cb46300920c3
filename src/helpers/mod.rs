/// Closure for `inspect_err` that logs the error at the call site.
///
/// ```ignore
/// store.get_post(id).await.inspect_err(ert!())?;
/// ```
#[macro_export]
macro_rules! ert {
    () => {
        |e| ::tracing::error!(error = %e, "{}:{}", file!(), line!())
    };
    ($msg:literal) => {
        |e| ::tracing::error!(error = %e, $msg)
    };
}
