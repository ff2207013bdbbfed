pub(crate) mod locate;
pub(crate) mod store;
