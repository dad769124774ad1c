use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::api::{DynNavigator, DynRouteStore, DynToasts};
use crate::entities::SavedRoute;

/// The saved-runs screen: a live list of previously persisted route
/// summaries.
pub struct MyRunsScreen {
    store: DynRouteStore,
    toasts: DynToasts,
    navigator: DynNavigator,
    routes: Arc<Mutex<Vec<SavedRoute>>>,
}

impl MyRunsScreen {
    pub fn new(store: DynRouteStore, toasts: DynToasts, navigator: DynNavigator) -> Self {
        Self {
            store,
            toasts,
            navigator,
            routes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Subscribe to the store. The first snapshot is applied before entry
    /// completes; later snapshots are applied as they arrive.
    #[tracing::instrument(skip(self))]
    pub async fn enter(&self) {
        match self.store.all_routes().await {
            Ok(mut feed) => {
                if let Some(initial) = feed.next().await {
                    *self.routes.lock().await = initial;
                }

                let routes = self.routes.clone();
                tokio::spawn(async move {
                    while let Some(snapshot) = feed.next().await {
                        *routes.lock().await = snapshot;
                    }
                });
            }
            Err(err) => {
                tracing::error!("error listing saved routes: {}", err);
                self.toasts.show("Error loading saved routes");
            }
        }
    }

    pub async fn routes(&self) -> Vec<SavedRoute> {
        self.routes.lock().await.clone()
    }

    pub fn back(&self) {
        self.navigator.back();
    }
}
