use tokio::task::JoinHandle;

#[derive(Default)]
pub struct BackgroundTasks {
    pub sweep: Option<JoinHandle<()>>,
    pub watcher: Option<JoinHandle<()>>,
}

impl BackgroundTasks {
    pub async fn abort_all(&mut self) {
        if let Some(handle) = self.sweep.take() {
            handle.abort();
        }
        if let Some(handle) = self.watcher.take() {
            handle.abort();
        }
    }
}
