use poolpath::graph::VertexId;
use poolpath::route::{RouteResult, Router};
use poolpath::spatial::Coordinates;
use poolpath::PathError;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Instant;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error};

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RouteQuery {
    Vertices { source: VertexId, target: VertexId },
    Coordinates { from: Coordinates, to: Coordinates },
}

pub type RouteAnswer = Result<Option<RouteResult>, PathError>;

#[derive(Debug, Error, PartialEq)]
pub enum WorkerError {
    #[error("route workers are not running")]
    Closed,

    #[error("route worker dropped the request")]
    Dropped,
}

struct Job {
    query: RouteQuery,
    reply: oneshot::Sender<RouteAnswer>,
}

/// Fixed set of routing threads sharing one graph snapshot. Requests wait in a
/// bounded queue until a thread is free. Dropping every handle stops the threads
/// once the queue is drained.
#[derive(Clone, Debug)]
pub struct WorkerPool {
    jobs: mpsc::Sender<Job>,
}

impl WorkerPool {
    pub fn start(router: Router, threads: usize, capacity: usize) -> (Self, Vec<JoinHandle<()>>) {
        let (jobs, receiver) = mpsc::channel::<Job>(capacity.max(1));
        let receiver = Arc::new(Mutex::new(receiver));

        let handles = (0..threads.max(1))
            .map(|worker| {
                let router = router.clone();
                let receiver = Arc::clone(&receiver);
                thread::spawn(move || run_worker(worker, &router, &receiver))
            })
            .collect();

        (WorkerPool { jobs }, handles)
    }

    pub async fn route(&self, query: RouteQuery) -> Result<RouteAnswer, WorkerError> {
        let (reply, answer) = oneshot::channel();
        self.jobs
            .send(Job { query, reply })
            .await
            .map_err(|_| WorkerError::Closed)?;
        answer.await.map_err(|_| WorkerError::Dropped)
    }
}

fn run_worker(worker: usize, router: &Router, receiver: &Mutex<mpsc::Receiver<Job>>) {
    debug!(worker, "route worker started");
    loop {
        let job = {
            let mut receiver = match receiver.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            receiver.blocking_recv()
        };
        let Job { query, reply } = match job {
            Some(job) => job,
            None => break,
        };

        let route_timer = Instant::now();
        let answer = execute(router, &query);
        match &answer {
            Ok(route) => debug!(
                worker,
                ?query,
                found = route.is_some(),
                elapsed = ?route_timer.elapsed(),
                "route query finished"
            ),
            Err(err) => error!(worker, ?query, %err, "route query failed"),
        }

        // The requester may have given up waiting
        let _ = reply.send(answer);
    }
    debug!(worker, "route worker stopped");
}

fn execute(router: &Router, query: &RouteQuery) -> RouteAnswer {
    match *query {
        RouteQuery::Vertices { source, target } => router.route_between_vertices(source, target),
        RouteQuery::Coordinates { from, to } => router.route(&from, &to),
    }
}
