//! Resolver for pre-built callables.

use waypost_core::{
    ControllerRef, HandlerDescriptor, HandlerResolver, InvalidHandlerError, Request, Resolution,
    ResolvedHandler,
};

/// Wraps [`HandlerDescriptor::Callable`] descriptors as-is; declines named ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallableResolver;

impl HandlerResolver for CallableResolver {
    fn resolve(
        &self,
        _request: &Request,
        descriptor: &HandlerDescriptor,
    ) -> Result<Resolution, InvalidHandlerError> {
        Ok(match descriptor {
            HandlerDescriptor::Callable(handler) => Resolution::Resolved(ResolvedHandler {
                handler: handler.clone(),
                controller: ControllerRef::callable(descriptor.to_string()),
            }),
            HandlerDescriptor::Named(_) => Resolution::Declined,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::sync::Arc;
    use waypost_core::callable;

    #[test]
    fn test_wraps_callable_without_copying() {
        let descriptor = callable(|_: &Request| ());
        let HandlerDescriptor::Callable(original) = &descriptor else {
            unreachable!()
        };

        let resolved = CallableResolver
            .resolve(&Request::new(Bytes::new()), &descriptor)
            .unwrap()
            .resolved()
            .unwrap();
        assert!(Arc::ptr_eq(original, &resolved.handler));
        assert!(resolved.controller.controller().is_none());
    }

    #[test]
    fn test_declines_named_descriptor() {
        let resolution = CallableResolver
            .resolve(&Request::new(Bytes::new()), &HandlerDescriptor::from("Users#show"))
            .unwrap();
        assert!(resolution.is_declined());
    }
}
