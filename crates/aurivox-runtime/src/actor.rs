//! Dedicated-thread serial actors.
//!
//! Each manager in the SDK owns its state on one named OS thread and is
//! driven through an [`ActorRef`] mailbox. `cast` is fire-and-forget,
//! `call`/`call_async` wait for the handler's response with a timeout.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::Sender;
use tokio::sync::oneshot;

pub trait Actor: Send + 'static {}

impl<T> Actor for T where T: Send + 'static {}

pub trait Message: Send + 'static {
    type Response: Send + 'static;
}

pub trait Handler<M>: Actor + Sized
where
    M: Message,
{
    fn handle(&mut self, message: M, ctx: &mut ActorContext<Self>) -> M::Response;
}

/// Per-actor loop state handed to every handler invocation.
///
/// Carries a reference back to the actor's own mailbox so handlers can
/// schedule follow-up work (e.g. a timer casting a message to the actor
/// that armed it).
pub struct ActorContext<A: Actor> {
    stop_requested: bool,
    self_ref: ActorRef<A>,
}

impl<A: Actor> ActorContext<A> {
    pub fn stop(&mut self) {
        self.stop_requested = true;
    }

    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested
    }

    pub fn actor_ref(&self) -> ActorRef<A> {
        self.self_ref.clone()
    }
}

type Task<A> = Box<dyn FnOnce(&mut A, &mut ActorContext<A>) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastError {
    MailboxClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallError {
    MailboxClosed,
    Timeout,
    ActorStopped,
}

pub struct ActorRef<A: Actor> {
    tx: Sender<Task<A>>,
}

impl<A: Actor> Clone for ActorRef<A> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<A: Actor> ActorRef<A> {
    pub fn cast<M>(&self, message: M) -> Result<(), CastError>
    where
        M: Message<Response = ()>,
        A: Handler<M>,
    {
        let task: Task<A> = Box::new(move |actor, ctx| actor.handle(message, ctx));
        self.tx.send(task).map_err(|_| CastError::MailboxClosed)
    }

    /// Blocking request/response with a reply deadline. Safe to use from
    /// any thread, including runtime workers (it parks the caller, it
    /// does not enter the runtime).
    pub fn call<M>(&self, message: M, timeout: Duration) -> Result<M::Response, CallError>
    where
        M: Message,
        A: Handler<M>,
    {
        let (response_tx, response_rx) = crossbeam_channel::bounded(1);
        let task: Task<A> = Box::new(move |actor, ctx| {
            let _ = response_tx.send(actor.handle(message, ctx));
        });
        self.tx.send(task).map_err(|_| CallError::MailboxClosed)?;
        match response_rx.recv_timeout(timeout) {
            Ok(response) => Ok(response),
            Err(crossbeam_channel::RecvTimeoutError::Timeout) => Err(CallError::Timeout),
            Err(crossbeam_channel::RecvTimeoutError::Disconnected) => Err(CallError::ActorStopped),
        }
    }

    pub async fn call_async<M>(
        &self,
        message: M,
        timeout: Duration,
    ) -> Result<M::Response, CallError>
    where
        M: Message,
        A: Handler<M>,
    {
        let (response_tx, response_rx) = oneshot::channel();
        let task: Task<A> = Box::new(move |actor, ctx| {
            let _ = response_tx.send(actor.handle(message, ctx));
        });
        self.tx.send(task).map_err(|_| CallError::MailboxClosed)?;
        match tokio::time::timeout(timeout, response_rx).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(_)) => Err(CallError::ActorStopped),
            Err(_) => Err(CallError::Timeout),
        }
    }
}

pub fn spawn_actor_named<A: Actor>(
    actor: A,
    thread_name: impl Into<String>,
) -> std::io::Result<(ActorRef<A>, JoinHandle<()>)> {
    let (tx, rx) = crossbeam_channel::unbounded::<Task<A>>();
    let actor_ref = ActorRef { tx };
    let loop_ref = actor_ref.clone();
    let join = thread::Builder::new()
        .name(thread_name.into())
        .spawn(move || run_actor_loop(actor, loop_ref, rx))?;
    Ok((actor_ref, join))
}

fn run_actor_loop<A: Actor>(
    mut actor: A,
    self_ref: ActorRef<A>,
    rx: crossbeam_channel::Receiver<Task<A>>,
) {
    let mut ctx = ActorContext {
        stop_requested: false,
        self_ref,
    };
    while let Ok(task) = rx.recv() {
        let result = catch_unwind(AssertUnwindSafe(|| task(&mut actor, &mut ctx)));
        if result.is_err() || ctx.is_stop_requested() {
            break;
        }
    }
}
