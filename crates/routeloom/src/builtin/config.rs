use crate::module::ModuleRegistry;

mod middleware;

pub(super) fn register(registry: &mut ModuleRegistry) {
    registry.register(middleware::SOURCE, middleware::export);
}
