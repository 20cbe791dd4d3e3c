use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::pipeline::batch_executor::{
    BatchError, BatchExecutor, ProgressCallback, SegmentationJob, SegmentationOutcome,
};
use crate::pipeline::segment_phrases_use_case::SegmentPhrasesUseCase;
use crate::segmentation::domain::segment_config::SegmentConfig;

const DEFAULT_CHANNEL_CAPACITY: usize = 8;

/// Segments jobs on a pool of worker threads.
///
/// Layout: `dispatcher → workers → main [collect/reorder]`
pub struct ThreadedBatchExecutor {
    workers: usize,
    channel_capacity: usize,
}

impl ThreadedBatchExecutor {
    pub fn new() -> Self {
        Self::with_workers(
            std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
        )
    }

    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl Default for ThreadedBatchExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchExecutor for ThreadedBatchExecutor {
    fn execute(
        &self,
        jobs: Vec<SegmentationJob>,
        config: &SegmentConfig,
        on_progress: Option<ProgressCallback>,
    ) -> Result<Vec<SegmentationOutcome>, BatchError> {
        let total = jobs.len();
        if total == 0 {
            return Ok(Vec::new());
        }
        let n_workers = self.workers.min(total);
        log::info!("Segmenting {total} transcripts on {n_workers} workers");

        let (job_tx, job_rx) =
            crossbeam_channel::bounded::<(usize, SegmentationJob)>(self.channel_capacity);
        let (result_tx, result_rx) =
            crossbeam_channel::bounded::<(usize, SegmentationOutcome)>(self.channel_capacity);
        let stopped = Arc::new(AtomicBool::new(false));

        let dispatcher = spawn_dispatcher(jobs, job_tx, stopped.clone());
        let workers: Vec<_> = (0..n_workers)
            .map(|_| spawn_worker(config.clone(), job_rx.clone(), result_tx.clone()))
            .collect();
        drop(job_rx);
        drop(result_tx);

        let mut slots: Vec<Option<SegmentationOutcome>> = vec![None; total];
        let mut received = 0usize;
        for (idx, outcome) in result_rx {
            log::debug!("finished {} ({idx})", outcome.name);
            slots[idx] = Some(outcome);
            received += 1;
            if let Some(ref cb) = on_progress {
                if !cb(received, total) {
                    stopped.store(true, Ordering::Relaxed);
                }
            }
        }

        join_threads(dispatcher, workers)?;

        let was_stopped = stopped.load(Ordering::Relaxed);
        if received < total && !was_stopped {
            return Err(BatchError::ChannelClosed {
                received,
                expected: total,
            });
        }
        if was_stopped {
            log::info!("Batch stopped after {received} of {total} transcripts");
        }
        Ok(slots.into_iter().flatten().collect())
    }
}

fn spawn_dispatcher(
    jobs: Vec<SegmentationJob>,
    job_tx: crossbeam_channel::Sender<(usize, SegmentationJob)>,
    stopped: Arc<AtomicBool>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        for indexed in jobs.into_iter().enumerate() {
            if stopped.load(Ordering::Relaxed) {
                break;
            }
            if job_tx.send(indexed).is_err() {
                break;
            }
        }
    })
}

fn spawn_worker(
    config: SegmentConfig,
    job_rx: crossbeam_channel::Receiver<(usize, SegmentationJob)>,
    result_tx: crossbeam_channel::Sender<(usize, SegmentationOutcome)>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        let use_case = SegmentPhrasesUseCase::new(config);
        for (idx, job) in job_rx {
            let phrases = use_case.execute(&job.segments);
            let outcome = SegmentationOutcome {
                name: job.name,
                phrases,
            };
            if result_tx.send((idx, outcome)).is_err() {
                break;
            }
        }
    })
}

fn join_threads(
    dispatcher: std::thread::JoinHandle<()>,
    workers: Vec<std::thread::JoinHandle<()>>,
) -> Result<(), BatchError> {
    let mut panicked = dispatcher.join().is_err();
    for handle in workers {
        panicked |= handle.join().is_err();
    }
    if panicked {
        return Err(BatchError::WorkerPanicked);
    }
    Ok(())
}
