mod acquire_channel;
mod listeners;
mod release_channel;
mod shutdown;
mod snapshot;
