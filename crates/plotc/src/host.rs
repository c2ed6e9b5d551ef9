//! Shader-object replacement discipline.
//!
//! The render loop owns exactly one live shader object. A recompile
//! builds the complete new source first and only on total success asks
//! the host to load it; the previous object is released strictly after
//! the new one exists, so every frame in between still has a valid
//! shader to draw with. A failure at any stage leaves the active
//! object untouched.

use crate::CompileError;

/// The host's shader primitives: load source into an opaque handle,
/// release a handle that is no longer drawn with.
pub trait ShaderHost {
    type Handle;
    type Error;

    fn load(&mut self, source: &str) -> Result<Self::Handle, Self::Error>;
    fn release(&mut self, handle: Self::Handle);
}

#[derive(Debug, thiserror::Error)]
pub enum RecompileError<E> {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error("the host failed to load the compiled shader")]
    Load(#[source] E),
}

/// Owns the currently active shader handle for one plotted equation.
#[derive(Debug)]
pub struct ShaderSlot<H: ShaderHost> {
    active: Option<H::Handle>,
}

impl<H: ShaderHost> Default for ShaderSlot<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ShaderHost> ShaderSlot<H> {
    pub fn new() -> Self {
        Self { active: None }
    }

    /// The handle the render loop should draw with, if any compile has
    /// succeeded yet.
    pub fn active(&self) -> Option<&H::Handle> {
        self.active.as_ref()
    }

    /// Compiles `equation` and swaps in the resulting shader. The old
    /// handle is released only after the new one is fully loaded.
    pub fn recompile(
        &mut self,
        host: &mut H,
        equation: &str,
    ) -> Result<(), RecompileError<H::Error>> {
        let source = crate::compile(equation)?;
        let fresh = host.load(&source).map_err(RecompileError::Load)?;
        if let Some(old) = self.active.replace(fresh) {
            host.release(old);
        }
        Ok(())
    }

    /// Releases the active handle, if any.
    pub fn release(mut self, host: &mut H) {
        if let Some(handle) = self.active.take() {
            host.release(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct MockHost {
        next_handle: u32,
        loaded: Vec<String>,
        released: Vec<u32>,
        fail_next_load: bool,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("mock load failure")]
    struct MockLoadError;

    impl ShaderHost for MockHost {
        type Handle = u32;
        type Error = MockLoadError;

        fn load(&mut self, source: &str) -> Result<u32, MockLoadError> {
            if self.fail_next_load {
                return Err(MockLoadError);
            }
            self.loaded.push(source.to_owned());
            self.next_handle += 1;
            Ok(self.next_handle)
        }

        fn release(&mut self, handle: u32) {
            self.released.push(handle);
        }
    }

    #[test]
    fn first_success_releases_nothing() {
        let mut host = MockHost::default();
        let mut slot = ShaderSlot::new();
        slot.recompile(&mut host, "y = x").unwrap();
        assert_eq!(slot.active(), Some(&1));
        assert!(host.released.is_empty());
    }

    #[test]
    fn swap_releases_exactly_the_old_handle() {
        let mut host = MockHost::default();
        let mut slot = ShaderSlot::new();
        slot.recompile(&mut host, "y = x").unwrap();
        slot.recompile(&mut host, "y = x^2").unwrap();
        assert_eq!(slot.active(), Some(&2));
        assert_eq!(host.released, vec![1]);
    }

    #[test]
    fn failed_compile_preserves_the_active_shader() {
        let mut host = MockHost::default();
        let mut slot = ShaderSlot::new();
        slot.recompile(&mut host, "y = x").unwrap();

        let err = slot.recompile(&mut host, "y = z").unwrap_err();
        assert!(matches!(err, RecompileError::Compile(_)));
        assert_eq!(slot.active(), Some(&1));
        assert!(host.released.is_empty());
        assert_eq!(host.loaded.len(), 1);
    }

    #[test]
    fn failed_load_preserves_the_active_shader() {
        let mut host = MockHost::default();
        let mut slot = ShaderSlot::new();
        slot.recompile(&mut host, "y = x").unwrap();

        host.fail_next_load = true;
        let err = slot.recompile(&mut host, "y = x^2").unwrap_err();
        assert!(matches!(err, RecompileError::Load(_)));
        assert_eq!(slot.active(), Some(&1));
        assert!(host.released.is_empty());
    }

    #[test]
    fn release_hands_the_handle_back() {
        let mut host = MockHost::default();
        let mut slot = ShaderSlot::new();
        slot.recompile(&mut host, "y = x").unwrap();
        slot.release(&mut host);
        assert_eq!(host.released, vec![1]);
    }
}
