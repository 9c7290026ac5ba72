use crate::capability::{CapabilityError, Classifier, LabelScore, QaAnswer, QuestionAnswerer};
use once_cell::sync::OnceCell;
use std::sync::Arc;

static SHARED: OnceCell<Arc<Models>> = OnceCell::new();

/// The pair of loaded inference models.
///
/// Models are expensive to load, so a process keeps one shared instance,
/// created lazily on first use and never torn down. Adapters hold it through
/// an [`Arc`] and only ever read from it.
#[derive(Clone)]
pub struct Models {
    classifier: Arc<dyn Classifier>,
    answerer: Arc<dyn QuestionAnswerer>,
}

impl Models {
    pub fn new(classifier: Arc<dyn Classifier>, answerer: Arc<dyn QuestionAnswerer>) -> Self {
        Self {
            classifier,
            answerer,
        }
    }

    /// Builds models from plain functions or closures.
    pub fn from_fns<C, A>(classify: C, answer: A) -> Self
    where
        C: Fn(&str, &[String]) -> Result<Vec<LabelScore>, CapabilityError> + Send + Sync + 'static,
        A: Fn(&str, &str) -> Result<QaAnswer, CapabilityError> + Send + Sync + 'static,
    {
        Self::new(Arc::new(classify), Arc::new(answer))
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn answerer(&self) -> &dyn QuestionAnswerer {
        self.answerer.as_ref()
    }

    /// The process-wide instance, if one was initialized.
    pub fn shared() -> Option<Arc<Models>> {
        SHARED.get().cloned()
    }

    /// Returns the process-wide instance, loading it with `init` on first use.
    ///
    /// Concurrent first callers block until the one running `init` is done,
    /// so the models are loaded at most once. If `init` fails, nothing is
    /// stored and the next call tries again.
    pub fn shared_or_init<F>(init: F) -> Result<Arc<Models>, CapabilityError>
    where
        F: FnOnce() -> Result<Models, CapabilityError>,
    {
        load_once(&SHARED, init)
    }
}

fn load_once<F>(cell: &OnceCell<Arc<Models>>, init: F) -> Result<Arc<Models>, CapabilityError>
where
    F: FnOnce() -> Result<Models, CapabilityError>,
{
    cell.get_or_try_init(|| {
        log::info!("Loading inference models.");
        init().map(Arc::new)
    })
    .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::thread;
    use std::time::Duration;

    fn never_called() -> Result<Models, CapabilityError> {
        Err(CapabilityError::NotConfigured("second init".to_string()))
    }

    fn scripted() -> Models {
        Models::from_fns(
            |_text: &str, labels: &[String]| {
                Ok(labels.iter().map(|l| LabelScore::new(l.clone(), 1.0)).collect())
            },
            |_question: &str, _context: &str| Ok(QaAnswer::none()),
        )
    }

    #[test]
    fn test_shared_models_initialize_once() {
        let first = Models::shared_or_init(|| Ok(scripted())).unwrap();

        let second = Models::shared_or_init(never_called).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(Models::shared().is_some());
    }

    #[test]
    fn test_concurrent_first_use_loads_once() {
        const THREADS: usize = 4;
        let cell: OnceCell<Arc<Models>> = OnceCell::new();
        let loads = AtomicUsize::new(0);
        let barrier = Barrier::new(THREADS);

        let handed_out: Vec<Arc<Models>> = thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        load_once(&cell, || {
                            loads.fetch_add(1, Ordering::SeqCst);
                            thread::sleep(Duration::from_millis(100));
                            Ok(scripted())
                        })
                        .unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert!(handed_out.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[test]
    fn test_failed_load_is_retried() {
        let cell: OnceCell<Arc<Models>> = OnceCell::new();
        assert!(load_once(&cell, never_called).is_err());
        assert!(cell.get().is_none());

        let models = load_once(&cell, || Ok(scripted())).unwrap();
        assert!(Arc::ptr_eq(&models, cell.get().unwrap()));
    }
}
