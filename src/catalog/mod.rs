pub(crate) mod load;
pub(crate) mod model;
pub(crate) mod parse;
pub(crate) mod resolve;
