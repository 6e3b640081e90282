mod deadline_fired;
mod on_post_processed;
mod on_requested;
mod pending_count;
mod shutdown;
