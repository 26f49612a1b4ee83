//! Seam to the model assertion subsystem.

use std::fmt;
use std::sync::Arc;

/// Identity of the device model a boot chain applies to.
pub trait ModelIdentity: fmt::Debug + Send + Sync {
    fn brand_id(&self) -> &str;
    fn model(&self) -> &str;
    fn grade(&self) -> &str;
    fn sign_key_id(&self) -> &str;
}

/// Shared handle to a resolved model. Two handles are equal only when they
/// point at the same model object.
#[derive(Clone)]
pub struct ModelRef(Arc<dyn ModelIdentity>);

impl ModelRef {
    pub fn new(model: Arc<dyn ModelIdentity>) -> Self {
        Self(model)
    }

    pub fn identity(&self) -> &dyn ModelIdentity {
        self.0.as_ref()
    }
}

impl<M: ModelIdentity + 'static> From<Arc<M>> for ModelRef {
    fn from(model: Arc<M>) -> Self {
        Self(model)
    }
}

impl PartialEq for ModelRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for ModelRef {}

impl fmt::Debug for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModelRef").field(&self.0).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Model(&'static str);

    impl ModelIdentity for Model {
        fn brand_id(&self) -> &str {
            "mybrand"
        }
        fn model(&self) -> &str {
            self.0
        }
        fn grade(&self) -> &str {
            "dangerous"
        }
        fn sign_key_id(&self) -> &str {
            "my-key-id"
        }
    }

    #[test]
    fn equality_follows_identity() {
        let one = ModelRef::from(Arc::new(Model("foo")));
        let same = one.clone();
        let lookalike = ModelRef::from(Arc::new(Model("foo")));
        assert_eq!(one, same);
        assert_ne!(one, lookalike);
        assert_eq!(lookalike.identity().model(), "foo");
    }
}
