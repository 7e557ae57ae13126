/// Build an error from a constructor and a format string
///
/// ```
/// use rest_errors::{ErrorOptions, rest_error, status};
///
/// let id = 7;
/// let plain = rest_error!(status::not_found);
/// let formatted = rest_error!(status::not_found, "no widget {id}");
/// let with_options = rest_error!(
///     status::bad_request,
///     options = ErrorOptions::new().status_code(422),
///     "bad field {}",
///     "name"
/// );
///
/// assert_eq!(plain.message(), "");
/// assert_eq!(formatted.message(), "no widget 7");
/// assert_eq!(with_options.status_code().map(|s| s.as_u16()), Some(422));
/// ```
#[macro_export]
macro_rules! rest_error {
    ($ctor:path $(,)?) => {
        $ctor($crate::ErrorOptions::new())
    };
    ($ctor:path, options = $options:expr $(,)?) => {
        $ctor($options)
    };
    ($ctor:path, options = $options:expr, $($fmt:tt)+) => {
        $ctor(($options).format(::std::format_args!($($fmt)+)))
    };
    ($ctor:path, $($fmt:tt)+) => {
        $ctor($crate::ErrorOptions::new().format(::std::format_args!($($fmt)+)))
    };
}
