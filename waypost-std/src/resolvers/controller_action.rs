//! Resolver for `"<ControllerId>#<action>"` descriptors.

use waypost_core::{
    ActionRef, ControllerRef, HandlerDescriptor, HandlerResolver, Injector, InvalidHandlerError,
    Request, Resolution, ResolvedHandler,
};

/// Resolves controller-action descriptors through an [`Injector`].
///
/// Descriptors without a `#` are declined so other resolvers can take them.
/// For the rest, the controller is constructed for every resolution and the
/// action is bound to that instance.
#[derive(Debug, Clone)]
pub struct ControllerActionResolver<I> {
    injector: I,
}

impl<I> ControllerActionResolver<I> {
    /// Create a resolver constructing controllers through `injector`.
    pub fn new(injector: I) -> Self {
        Self { injector }
    }

    /// The injector.
    pub fn injector(&self) -> &I {
        &self.injector
    }
}

impl<I: Injector> HandlerResolver for ControllerActionResolver<I> {
    fn resolve(
        &self,
        _request: &Request,
        descriptor: &HandlerDescriptor,
    ) -> Result<Resolution, InvalidHandlerError> {
        let Some(name) = descriptor.as_named() else {
            return Ok(Resolution::Declined);
        };
        let Some(ActionRef { controller, action }) = ActionRef::parse(name) else {
            return Ok(Resolution::Declined);
        };

        let instance =
            self.injector
                .make(controller)
                .map_err(|source| InvalidHandlerError::Construction {
                    descriptor: name.to_owned(),
                    source,
                })?;

        let handler =
            instance
                .clone()
                .bind(action)
                .ok_or_else(|| InvalidHandlerError::NotCallable {
                    controller: controller.to_owned(),
                    action: action.to_owned(),
                })?;

        #[cfg(feature = "tracing")]
        {
            tracing::trace!(descriptor = %name, controller = instance.type_name(), "Resolved controller action");
        }

        Ok(Resolution::Resolved(ResolvedHandler {
            handler,
            controller: ControllerRef::instance(name, instance),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ControllerRegistry, Overrides, RegistryError};
    use bytes::Bytes;
    use http::StatusCode;
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };
    use waypost_core::{Outcome, controller_actions, text};

    struct HandlerWithOutMethod;

    impl HandlerWithOutMethod {
        fn other(&self, _request: &Request) -> http::Response<Bytes> {
            text(StatusCode::OK, "other")
        }
    }

    controller_actions!(HandlerWithOutMethod { "other" => other });

    struct HandlerWithMethod {
        val: Arc<Mutex<Option<&'static str>>>,
        calls: Arc<AtomicUsize>,
    }

    impl HandlerWithMethod {
        fn action(&self, _request: &Request) -> http::Response<Bytes> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.val.lock().unwrap() = Some("invoked");
            text(StatusCode::OK, "invoked")
        }
    }

    controller_actions!(HandlerWithMethod { "action" => action });

    fn request() -> Request {
        Request::new(Bytes::new())
    }

    fn resolver() -> ControllerActionResolver<ControllerRegistry> {
        let mut registry = ControllerRegistry::new();
        registry.register("HandlerWithOutMethod", |_: &Overrides| {
            Ok::<_, RegistryError>(HandlerWithOutMethod)
        });
        ControllerActionResolver::new(registry)
    }

    #[test]
    fn test_no_hash_tag_in_handler_declines() {
        let resolution = resolver()
            .resolve(&request(), &HandlerDescriptor::from("something_no_hashtag"))
            .unwrap();
        assert!(resolution.is_declined());
    }

    #[test]
    fn test_callable_descriptor_declines() {
        let descriptor = waypost_core::callable(|_: &Request| ());
        let resolution = resolver().resolve(&request(), &descriptor).unwrap();
        assert!(resolution.is_declined());
    }

    #[test]
    fn test_no_class_fails_with_descriptor_in_message() {
        let err = resolver()
            .resolve(&request(), &HandlerDescriptor::from("Not_Found_Class#action"))
            .unwrap_err();

        assert!(matches!(err, InvalidHandlerError::Construction { .. }));
        assert_eq!(
            err.to_string(),
            "An error was encountered creating the controller for Not_Found_Class#action."
        );
    }

    #[test]
    fn test_no_method_on_controller_fails() {
        let err = resolver()
            .resolve(&request(), &HandlerDescriptor::from("HandlerWithOutMethod#action"))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "The controller and action, HandlerWithOutMethod::action, is not callable. \
             Please ensure that a publicly accessible method is available with this name."
        );
    }

    #[test]
    fn test_valid_controller_action_results_in_right_callback() {
        let val = Arc::new(Mutex::new(None));
        let calls = Arc::new(AtomicUsize::new(0));

        let mut registry = ControllerRegistry::new();
        registry
            .register("HandlerWithMethod", |params: &Overrides| {
                Ok::<_, RegistryError>(HandlerWithMethod {
                    val: params
                        .require::<Arc<Mutex<Option<&'static str>>>>("HandlerWithMethod", "val")?
                        .clone(),
                    calls: params
                        .require::<Arc<AtomicUsize>>("HandlerWithMethod", "calls")?
                        .clone(),
                })
            })
            .define("HandlerWithMethod", "val", val.clone())
            .define("HandlerWithMethod", "calls", calls.clone());
        let resolver = ControllerActionResolver::new(registry);
        assert!(resolver.injector().contains("HandlerWithMethod"));
        assert!(!resolver.injector().contains("HandlerWithOutMethod"));

        let resolved = resolver
            .resolve(&request(), &HandlerDescriptor::from("HandlerWithMethod#action"))
            .unwrap()
            .resolved()
            .unwrap();
        assert_eq!(*val.lock().unwrap(), None);

        match resolved.handler.call(&request()) {
            Outcome::Response(response) => assert_eq!(response.body(), b"invoked"),
            other => panic!("expected a response, got {other:?}"),
        }
        assert_eq!(*val.lock().unwrap(), Some("invoked"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert_eq!(resolved.controller.label(), "HandlerWithMethod#action");
        assert!(
            resolved
                .controller
                .downcast_ref::<HandlerWithMethod>()
                .is_some()
        );
    }
}
