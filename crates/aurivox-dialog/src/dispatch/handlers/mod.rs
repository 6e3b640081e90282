mod cancel_dialog;
mod directive_completed;
mod group_status;
mod on_directives;
mod shutdown;
