//! Cross-target `Send`/`Sync` bounds for the authorization pipeline.
//!
//! On a native server every stage of the pipeline is shared across request
//! tasks: readers, stores, strategies and checkers sit behind `Arc` handles
//! and are awaited from whichever worker thread picks a request up, so the
//! async traits of this workspace all carry `Send`/`Sync` obligations. The
//! same traits compile for `wasm32-unknown-unknown`, where no threads exist
//! and those obligations would be unsatisfiable for browser-bound types;
//! there the bounds are empty. Declaring trait seams against these aliases
//! keeps every declaration identical across both targets.
//!
//! The blanket implementations cover unsized types too, so `dyn` pipeline
//! stages satisfy the bounds directly.

#[cfg(not(target_arch = "wasm32"))]
mod target {
    /// Values that may move to another request task.
    ///
    /// `Send` on threaded targets, no bound on `wasm32-unknown-unknown`.
    pub trait ConditionalSend: Send {}
    impl<T: Send + ?Sized> ConditionalSend for T {}

    /// Values that may be shared between request tasks.
    ///
    /// `Send + Sync` on threaded targets, no bound on
    /// `wasm32-unknown-unknown`.
    pub trait ConditionalSync: Send + Sync {}
    impl<T: Send + Sync + ?Sized> ConditionalSync for T {}
}

#[cfg(target_arch = "wasm32")]
mod target {
    /// Values that may move to another request task.
    ///
    /// `Send` on threaded targets, no bound on `wasm32-unknown-unknown`.
    pub trait ConditionalSend {}
    impl<T: ?Sized> ConditionalSend for T {}

    /// Values that may be shared between request tasks.
    ///
    /// `Send + Sync` on threaded targets, no bound on
    /// `wasm32-unknown-unknown`.
    pub trait ConditionalSync {}
    impl<T: ?Sized> ConditionalSync for T {}
}

pub use target::*;
