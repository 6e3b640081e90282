mod arbiter;
mod focus;
mod sync;
