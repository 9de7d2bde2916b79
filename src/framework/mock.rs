//! # Mock Framework
//!
//! Two ways to test a domain client without a real actor:
//!
//! - [`MockClient`]: queue expected requests with canned replies, run the
//!   code under test, then [`verify`](MockClient::verify) nothing is left.
//! - [`create_mock_client`]: get the raw receiver and answer each request by
//!   hand with [`expect_create`], [`expect_get`], [`expect_action`] or
//!   [`expect_list`]. Use this when the test needs to inspect the payload.
//!
//! ```ignore
//! let mut mock = MockClient::<OrderRecord>::new();
//! mock.expect_create().return_ok(OrderId(1));
//! let client = OrderClient::new(mock.client());
//! client.place_order(state).await?;
//! mock.verify();
//! ```

use super::{ActorEntity, FrameworkError, ResourceClient, ResourceRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<T: ActorEntity>(queue: &Queue<T>) -> MutexGuard<'_, VecDeque<Expectation<T>>> {
    queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn check_id<I: PartialEq + std::fmt::Debug>(op: &str, expected: &I, actual: &I) {
    assert_eq!(expected, actual, "{} called with an unexpected id", op);
}

/// A client backed by a queue of expected requests.
///
/// Requests must arrive in the order the expectations were queued. A request
/// that does not match the head of the queue panics the mock task, which the
/// caller then sees as [`FrameworkError::ActorDropped`].
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&queue).pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
                        check_id("get", &want, &id);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Update { id, respond_to, .. }, Some(Expectation::Update { id: want, response })) => {
                        check_id("update", &want, &id);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Delete { id, respond_to }, Some(Expectation::Delete { id: want, response })) => {
                        check_id("delete", &want, &id);
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Action { id, respond_to, .. }, Some(Expectation::Action { id: want, response })) => {
                        check_id("action", &want, &id);
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected {} request or expectation mismatch", request.kind());
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    fn builder<R>(
        &self,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }

    /// Panics if any queued expectation was never consumed.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Completes an expectation with the reply the mock should send.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        lock(&self.expectations).push_back((self.make)(Ok(value)));
    }

    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back((self.make)(Err(error)));
    }
}

// =============================================================================
// MANUAL RESPONDERS
// =============================================================================

/// A client wired to a bare receiver, for answering requests by hand.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is a create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<oneshot::Sender<Result<Vec<T>, FrameworkError>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Cup {
        id: u32,
        label: String,
    }

    #[derive(Debug)]
    struct CupCreate {
        label: String,
    }

    #[derive(Debug)]
    struct CupUpdate;

    #[derive(Debug)]
    enum CupAction {
        Refill,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("cup error")]
    struct CupError;

    #[async_trait]
    impl ActorEntity for Cup {
        type Id = u32;
        type Create = CupCreate;
        type Update = CupUpdate;
        type Action = CupAction;
        type ActionResult = bool;
        type Context = ();
        type Error = CupError;

        fn from_create_params(id: u32, params: CupCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                label: params.label,
            })
        }

        async fn on_update(&mut self, _update: CupUpdate, _ctx: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, _action: CupAction, _ctx: &()) -> Result<bool, Self::Error> {
            Ok(true)
        }
    }

    fn cup(id: u32) -> Cup {
        Cup {
            id,
            label: format!("cup {id}"),
        }
    }

    #[tokio::test]
    async fn test_manual_responder_sees_payload() {
        let (client, mut receiver) = create_mock_client::<Cup>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(CupCreate {
                    label: "flat white".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.label, "flat white");
        responder.send(Ok(1)).unwrap();

        assert!(matches!(create_task.await.unwrap(), Ok(1)));
    }

    #[tokio::test]
    async fn test_expectations_are_served_in_order() {
        let mut mock = MockClient::<Cup>::new();
        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(cup(1)));
        mock.expect_list().return_ok(vec![cup(1), cup(2)]);
        mock.expect_action(2).return_ok(true);
        mock.expect_delete(3).return_err(FrameworkError::NotFound("3".into()));

        let client = mock.client();
        let id = client
            .create(CupCreate {
                label: "x".into(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);
        assert_eq!(client.get(1).await.unwrap(), Some(cup(1)));
        assert_eq!(client.list().await.unwrap().len(), 2);
        assert!(client.perform_action(2, CupAction::Refill).await.unwrap());
        assert!(matches!(client.delete(3).await, Err(FrameworkError::NotFound(_))));

        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "remaining")]
    async fn test_verify_reports_unmet_expectations() {
        let mut mock = MockClient::<Cup>::new();
        mock.expect_update(1).return_ok(cup(1));
        mock.verify();
    }
}
