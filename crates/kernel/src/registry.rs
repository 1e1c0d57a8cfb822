use anyhow::Context;
use std::sync::Arc;

use crate::module::{InitCtx, Module};

/// Core module initialization order (excluding HTTP server)
const CORE_MODULE_ORDER: &[&str] = &[
    "storage", // Object storage client
    "authz",   // Bearer token verification
               // Note: HTTP server is started separately after all modules are initialized
];

/// Module registry for managing module lifecycle with core/custom separation
pub struct ModuleRegistry {
    core_modules: Vec<Arc<dyn Module>>,
    custom_modules: Vec<Arc<dyn Module>>,
}

impl ModuleRegistry {
    /// Create a new module registry
    pub fn new() -> Self {
        Self {
            core_modules: Vec::new(),
            custom_modules: Vec::new(),
        }
    }

    /// Register a core module with the registry
    pub fn register_core(&mut self, module: Arc<dyn Module>) {
        self.core_modules.push(module);
    }

    /// Register a custom module with the registry
    pub fn register_custom(&mut self, module: Arc<dyn Module>) {
        self.custom_modules.push(module);
    }

    /// Get all registered modules (core + custom)
    pub fn modules(&self) -> Vec<&Arc<dyn Module>> {
        self.core_modules
            .iter()
            .chain(self.custom_modules.iter())
            .collect()
    }

    /// Get a module by name (searches both core and custom modules)
    pub fn get_module(&self, name: &str) -> Option<&Arc<dyn Module>> {
        self.modules()
            .into_iter()
            .find(|module| module.name() == name)
    }

    pub fn core_module_count(&self) -> usize {
        self.core_modules.len()
    }

    pub fn custom_module_count(&self) -> usize {
        self.custom_modules.len()
    }

    /// Core modules in `CORE_MODULE_ORDER`; unknown core names are skipped.
    fn ordered_core(&self) -> impl DoubleEndedIterator<Item = &Arc<dyn Module>> {
        CORE_MODULE_ORDER.iter().filter_map(|&name| {
            self.core_modules
                .iter()
                .find(|module| module.name() == name)
        })
    }

    /// Initialize every module: core modules in order, then custom modules
    pub async fn init_all(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            "initializing core modules in order: {:?}",
            CORE_MODULE_ORDER
        );
        for module in self.ordered_core() {
            tracing::info!(module = module.name(), "initializing core module");
            module.init(ctx).await.with_context(|| {
                format!("failed to initialize core module '{}'", module.name())
            })?;
        }

        tracing::info!("initializing {} custom modules", self.custom_modules.len());
        for module in &self.custom_modules {
            tracing::info!(module = module.name(), "initializing custom module");
            module.init(ctx).await.with_context(|| {
                format!("failed to initialize custom module '{}'", module.name())
            })?;
        }

        Ok(())
    }

    /// Start every module: core modules in order, then custom modules
    pub async fn start_all(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        for module in self.ordered_core() {
            tracing::info!(module = module.name(), "starting core module");
            module
                .start(ctx)
                .await
                .with_context(|| format!("failed to start core module '{}'", module.name()))?;
        }

        for module in &self.custom_modules {
            tracing::info!(module = module.name(), "starting custom module");
            module
                .start(ctx)
                .await
                .with_context(|| format!("failed to start custom module '{}'", module.name()))?;
        }

        Ok(())
    }

    /// Stop custom modules first (reverse order), then core modules in reverse order
    pub async fn stop_all(&self) -> anyhow::Result<()> {
        tracing::info!("stopping {} custom modules", self.custom_modules.len());
        for module in self.custom_modules.iter().rev() {
            tracing::info!(module = module.name(), "stopping custom module");
            module
                .stop()
                .await
                .with_context(|| format!("failed to stop custom module '{}'", module.name()))?;
        }

        tracing::info!("stopping core modules in reverse order");
        for module in self.ordered_core().rev() {
            tracing::info!(module = module.name(), "stopping core module");
            module
                .stop()
                .await
                .with_context(|| format!("failed to stop core module '{}'", module.name()))?;
        }

        Ok(())
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use std::sync::Mutex;

    struct TestModule {
        name: &'static str,
        journal: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait::async_trait]
    impl Module for TestModule {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
            self.journal
                .lock()
                .unwrap()
                .push(format!("init:{}", self.name));
            Ok(())
        }

        async fn stop(&self) -> anyhow::Result<()> {
            self.journal
                .lock()
                .unwrap()
                .push(format!("stop:{}", self.name));
            Ok(())
        }
    }

    fn module(name: &'static str, journal: &Arc<Mutex<Vec<String>>>) -> Arc<dyn Module> {
        Arc::new(TestModule {
            name,
            journal: journal.clone(),
        })
    }

    #[test]
    fn test_module_registry_creation() {
        let registry = ModuleRegistry::new();
        assert!(registry.modules().is_empty());
        assert!(registry.get_module("property").is_none());
    }

    #[tokio::test]
    async fn test_module_lifecycle_order() {
        let journal = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ModuleRegistry::new();
        let settings = Settings::default();
        let ctx = InitCtx {
            settings: &settings,
        };

        registry.register_custom(module("property", &journal));
        registry.register_core(module("authz", &journal));
        registry.register_core(module("storage", &journal));

        assert_eq!(registry.core_module_count(), 2);
        assert_eq!(registry.custom_module_count(), 1);
        assert!(registry.get_module("storage").is_some());

        registry.init_all(&ctx).await.unwrap();
        registry.start_all(&ctx).await.unwrap();
        registry.stop_all().await.unwrap();

        let journal = journal.lock().unwrap().clone();
        assert_eq!(
            journal,
            vec![
                "init:storage",
                "init:authz",
                "init:property",
                "stop:property",
                "stop:authz",
                "stop:storage",
            ]
        );
    }
}
