use async_trait::async_trait;

mod binding;
pub mod builtins;
mod extractor;

pub use binding::{BindingError, BindingResult, MethodArgumentNotValid};
pub use extractor::ValidJson;

pub type PipeResult<T> = Result<T, MethodArgumentNotValid>;

/// The Pipe trait for transformation and validation
#[async_trait]
pub trait Pipe: Send + Sync + 'static {
    type Input: Send + 'static;
    type Output: Send + 'static;

    async fn transform(&self, input: Self::Input) -> PipeResult<Self::Output>;
}

/// Declares the constraints of a request payload
///
/// # Example
/// ```
/// use restfault::pipe::{BindingResult, Validate, builtins::check_size};
///
/// struct CreateUser {
///     name: String,
/// }
///
/// impl Validate for CreateUser {
///     fn validate(&self, result: &mut BindingResult) {
///         check_size(result, "name", &self.name, 2, 50);
///     }
/// }
///
/// assert_eq!(CreateUser::object_name(), "createUser");
/// ```
pub trait Validate {
    /// Name of the bound object in error reports, `createUser` for `CreateUser`
    fn object_name() -> String
    where
        Self: Sized,
    {
        default_object_name(std::any::type_name::<Self>())
    }

    /// Record every violated constraint in `result`
    fn validate(&self, result: &mut BindingResult);
}

fn default_object_name(type_name: &str) -> String {
    let base = type_name.split('<').next().unwrap_or(type_name);
    let short = base.rsplit("::").next().unwrap_or(base);

    let mut chars = short.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => "object".to_string(),
    }
}
