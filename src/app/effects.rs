use tracing::{info, warn};

use crate::app::{App, Message, Model, update};

impl App {
    /// Validate the session and hand it to the store.
    ///
    /// The draft is left untouched on failure so the save can be retried.
    pub(super) fn save(&mut self, model: Model) -> Model {
        let record = match model.prepare_save() {
            Ok(record) => record,
            Err(err) => {
                warn!(%err, "save refused");
                return update(model, Message::SaveFailed(err.to_string()));
            }
        };
        match self.store.save(&record) {
            Ok(saved) => {
                info!(id = saved.id.as_deref().unwrap_or(""), "save settled");
                update(model, Message::SaveSucceeded(saved))
            }
            Err(err) => {
                warn!(%err, "store rejected save");
                update(model, Message::SaveFailed(format!("Save failed: {err}")))
            }
        }
    }
}
