//! Background request worker
//!
//! Runs service calls on a dedicated thread with a current-thread tokio
//! runtime. Requests arrive over an unbounded channel, each runs as its own
//! task, and tagged results go back over a std channel that the UI thread
//! polls without blocking.

use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::api::{LessonPlanClient, ServiceError};
use crate::lesson::{FetchParams, GenerationRequest};
use crate::suggestions::Category;

/// Request messages sent to the worker
#[derive(Debug, Clone)]
pub enum WorkerRequest {
    /// Fetch suggestions of one category
    Fetch {
        category: Category,
        params: FetchParams,
        /// Unique ID for this request, used to filter stale responses
        request_id: u64,
    },
    /// Generate a lesson plan
    Generate {
        request: GenerationRequest,
        request_id: u64,
    },
    /// Abort the request with the given ID
    Cancel { request_id: u64 },
}

/// Response messages received from the worker
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    Suggestions {
        category: Category,
        request_id: u64,
        result: Result<Vec<String>, ServiceError>,
    },
    LessonPlan {
        request_id: u64,
        result: Result<String, ServiceError>,
    },
}

/// Channel ends handed to the coordinator
pub type WorkerChannels = (UnboundedSender<WorkerRequest>, Receiver<WorkerResponse>);

struct InFlight {
    cancel_token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Start the worker thread
///
/// The thread exits once every request sender has been dropped.
pub fn spawn(client: Result<LessonPlanClient, ServiceError>) -> io::Result<WorkerChannels> {
    let (request_tx, request_rx) = unbounded_channel();
    let (response_tx, response_rx) = mpsc::channel();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    thread::Builder::new()
        .name("lessonplan-worker".to_string())
        .spawn(move || {
            runtime.block_on(worker_loop(client, request_rx, response_tx));
            log::debug!("Request worker shutting down");
        })?;

    Ok((request_tx, response_rx))
}

/// Process requests until the request channel is closed
pub async fn worker_loop(
    client: Result<LessonPlanClient, ServiceError>,
    mut request_rx: UnboundedReceiver<WorkerRequest>,
    response_tx: Sender<WorkerResponse>,
) {
    let client = match client {
        Ok(client) => Ok(Arc::new(client)),
        Err(e) => {
            // Log now, report when a request comes in
            log::debug!("Service client not configured: {}", e);
            Err(e)
        }
    };
    let mut in_flight: HashMap<u64, InFlight> = HashMap::new();

    while let Some(request) = request_rx.recv().await {
        in_flight.retain(|_, task| !task.handle.is_finished());

        match request {
            WorkerRequest::Fetch {
                category,
                params,
                request_id,
            } => {
                let client = match &client {
                    Ok(client) => Arc::clone(client),
                    Err(e) => {
                        let _ = response_tx.send(WorkerResponse::Suggestions {
                            category,
                            request_id,
                            result: Err(e.clone()),
                        });
                        continue;
                    }
                };

                let cancel_token = CancellationToken::new();
                let task_token = cancel_token.clone();
                let tx = response_tx.clone();
                log::debug!("Fetching {} (request {})", category.label(), request_id);
                let handle = tokio::spawn(async move {
                    let result = client.suggestions(category, &params, &task_token).await;
                    let _ = tx.send(WorkerResponse::Suggestions {
                        category,
                        request_id,
                        result,
                    });
                });
                in_flight.insert(
                    request_id,
                    InFlight {
                        cancel_token,
                        handle,
                    },
                );
            }
            WorkerRequest::Generate {
                request,
                request_id,
            } => {
                let client = match &client {
                    Ok(client) => Arc::clone(client),
                    Err(e) => {
                        let _ = response_tx.send(WorkerResponse::LessonPlan {
                            request_id,
                            result: Err(e.clone()),
                        });
                        continue;
                    }
                };

                let cancel_token = CancellationToken::new();
                let task_token = cancel_token.clone();
                let tx = response_tx.clone();
                log::debug!("Generating lesson plan (request {})", request_id);
                let handle = tokio::spawn(async move {
                    let result = client.lesson_plan(&request, &task_token).await;
                    let _ = tx.send(WorkerResponse::LessonPlan { request_id, result });
                });
                in_flight.insert(
                    request_id,
                    InFlight {
                        cancel_token,
                        handle,
                    },
                );
            }
            WorkerRequest::Cancel { request_id } => match in_flight.remove(&request_id) {
                Some(task) => {
                    task.cancel_token.cancel();
                    log::debug!("Cancelled request {}", request_id);
                }
                None => {
                    log::debug!("Cancel for request {} (not in flight)", request_id);
                }
            },
        }
    }

    for task in in_flight.into_values() {
        task.cancel_token.cancel();
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
