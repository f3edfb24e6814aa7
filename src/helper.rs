pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;
