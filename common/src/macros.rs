/// An `info!` with a dedicated target so formatters can render operator
/// milestones with their own symbol.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        tracing::info!(target: "sweepr::success", $($arg)*)
    };
}
