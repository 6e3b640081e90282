mod cancel_sync;
mod prepare_sync;
mod release_sync;
mod shutdown;
mod snapshot;
mod start_sync;
