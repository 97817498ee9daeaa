/// Check applied to user input before it reaches the theme store.
///
/// `T` may be unsized, so name and color checks implement `Validator<str>`.
///
/// ```
/// use theme_store::validation::Validator;
///
/// struct ShortName;
/// impl Validator<str> for ShortName {
///     type Error = String;
///
///     fn validate(&self, input: &str) -> Result<(), Self::Error> {
///         match input.len() {
///             0 => Err("Name is empty".to_string()),
///             1..=20 => Ok(()),
///             _ => Err("Name is too long".to_string()),
///         }
///     }
/// }
///
/// assert_eq!(ShortName.accept("Sepia"), Ok("Sepia"));
/// ```
pub trait Validator<T: ?Sized> {
    type Error;

    fn validate(&self, input: &T) -> Result<(), Self::Error>;

    /// Hand the input back once it has passed [`validate`](Self::validate).
    fn accept<'a>(&self, input: &'a T) -> Result<&'a T, Self::Error> {
        self.validate(input).map(|()| input)
    }
}
