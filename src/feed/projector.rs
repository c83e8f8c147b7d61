use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::NewsApi;
use crate::app::FetchError;
use crate::domain::{Article, Category};
use crate::scheduler::{self, lock, ScheduledTask};

struct FeedInner {
    /// Replaced wholesale by each successful load, never edited in place.
    articles: Arc<[Article]>,
    category: Category,
    generation: u64,
    load_task: Option<ScheduledTask>,
    last_error: Option<FetchError>,
    loading_tx: watch::Sender<bool>,
}

/// Holds the fetched article collection and the selected category.
pub struct ArticleFeedProjector {
    api: Arc<dyn NewsApi>,
    inner: Arc<Mutex<FeedInner>>,
}

impl ArticleFeedProjector {
    pub fn new(api: Arc<dyn NewsApi>) -> Self {
        let (loading_tx, _) = watch::channel(false);
        Self {
            api,
            inner: Arc::new(Mutex::new(FeedInner {
                articles: Arc::from(Vec::new()),
                category: Category::Top,
                generation: 0,
                load_task: None,
                last_error: None,
                loading_tx,
            })),
        }
    }

    /// Fetch the article collection in the background. The loading flag is
    /// set until the request settles; on failure the previous collection is
    /// kept.
    pub fn load(&self) {
        let superseded = {
            let mut inner = lock(&self.inner);
            inner.generation += 1;
            let generation = inner.generation;
            inner.loading_tx.send_replace(true);

            let api = self.api.clone();
            let weak = Arc::downgrade(&self.inner);
            let task = scheduler::spawn(async move {
                let outcome = api.list_articles().await;
                if let Some(inner) = weak.upgrade() {
                    apply_load(&inner, generation, outcome);
                }
            });
            inner.load_task.replace(task)
        };
        drop(superseded);
    }

    /// Wait until no load is in flight.
    pub async fn settled(&self) {
        let mut rx = lock(&self.inner).loading_tx.subscribe();
        // Sender lives as long as `self`, so this only fails if we are dropped.
        let _ = rx.wait_for(|loading| !*loading).await;
    }

    pub fn is_loading(&self) -> bool {
        *lock(&self.inner).loading_tx.borrow()
    }

    pub fn category(&self) -> Category {
        lock(&self.inner).category
    }

    pub fn set_category(&self, category: Category) {
        lock(&self.inner).category = category;
    }

    /// Select a category by display name. Unknown names select `Top`.
    pub fn set_category_by_name(&self, name: &str) -> Category {
        let category = Category::from_name(name).unwrap_or_else(|| {
            debug!("Unknown category {:?}, showing Top", name);
            Category::Top
        });
        self.set_category(category);
        category
    }

    /// The full loaded collection.
    pub fn articles(&self) -> Arc<[Article]> {
        lock(&self.inner).articles.clone()
    }

    pub fn last_error(&self) -> Option<FetchError> {
        lock(&self.inner).last_error.clone()
    }

    /// Articles matching the active category.
    pub fn visible(&self) -> FeedView {
        let inner = lock(&self.inner);
        FeedView::new(inner.articles.clone(), inner.category)
    }
}

impl Drop for ArticleFeedProjector {
    fn drop(&mut self) {
        let pending = lock(&self.inner).load_task.take();
        drop(pending);
    }
}

fn apply_load(
    inner: &Mutex<FeedInner>,
    generation: u64,
    outcome: Result<Vec<Article>, FetchError>,
) {
    let finished = {
        let mut inner = lock(inner);
        if inner.generation != generation {
            debug!("Discarding superseded article load");
            return;
        }

        match outcome {
            Ok(articles) => {
                info!("Loaded {} articles", articles.len());
                inner.articles = Arc::from(articles);
                inner.last_error = None;
            }
            Err(e) => {
                warn!("Failed to load articles: {}", e);
                inner.last_error = Some(e);
            }
        }
        inner.loading_tx.send_replace(false);
        inner.load_task.take()
    };
    drop(finished);
}

/// Read-only projection of a loaded collection under one category.
///
/// Holds its own reference to the collection, so a later load does not
/// change a view already handed out.
#[derive(Debug, Clone)]
pub struct FeedView {
    articles: Arc<[Article]>,
    category: Category,
}

impl FeedView {
    pub fn new(articles: Arc<[Article]>, category: Category) -> Self {
        Self { articles, category }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn iter(&self) -> impl Iterator<Item = &Article> + '_ {
        let category = self.category;
        self.articles
            .iter()
            .filter(move |article| category.matches(&article.category))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn get(&self, index: usize) -> Option<&Article> {
        self.iter().nth(index)
    }
}
