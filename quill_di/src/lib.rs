//! Minimal compile-time dependency injection.
//!
//! Services derive [`Build`] and declare their dependencies as fields. A
//! provider created with [`provider!`] supplies the leaf values (configs,
//! clients) and caches every service it builds, so each type is only
//! constructed once per provider.

extern crate self as quill_di;

pub use quill_di_derive::Build;
pub use typemap::TypeMap;

mod macros;
mod typemap;

pub trait Provider: Sized {
    /// Returns a clone of the cached instance of `T`, if there is one.
    fn get<T: 'static + Clone>(&self) -> Option<T>;

    /// Caches `value` so subsequent builds of `T` reuse it.
    fn insert<T: 'static>(&mut self, value: T);
}

#[diagnostic::on_unimplemented(
    message = "The type `{Self}` cannot be built using the provider `{P}`",
    note = "Add `{Self}` to the provider `{P}` or derive `Build` for `{Self}` and make sure all \
            of its dependencies can be built"
)]
pub trait Build<P: Provider>: Clone + 'static {
    fn build(provider: &mut P) -> Self;
}

pub trait Provide: Provider {
    fn provide<T: Build<Self>>(&mut self) -> T {
        T::build(self)
    }
}

impl<P: Provider> Provide for P {}
