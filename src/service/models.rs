//! Model manager selection

use crate::core::model_manager::{
    BasicModelManager, DynamicModelManager, ModelManager, TurbineModelManager,
};
use crate::core::models::ModelKind;
use crate::storage::SecurityStore;
use crate::utils::error::{Result, SecurityError};
use std::sync::Arc;

/// The model manager of the configured model
#[derive(Debug, Clone)]
pub enum ModelManagers {
    Basic(Arc<BasicModelManager>),
    Dynamic(Arc<DynamicModelManager>),
    Turbine(Arc<TurbineModelManager>),
}

impl ModelManagers {
    pub fn new(model: ModelKind, store: Arc<dyn SecurityStore>, global_group: &str) -> Self {
        match model {
            ModelKind::Basic => Self::Basic(Arc::new(BasicModelManager::new(store))),
            ModelKind::Dynamic => Self::Dynamic(Arc::new(DynamicModelManager::new(store))),
            ModelKind::Turbine => {
                Self::Turbine(Arc::new(TurbineModelManager::new(store, global_group)))
            }
        }
    }

    pub fn model(&self) -> ModelKind {
        match self {
            Self::Basic(_) => ModelKind::Basic,
            Self::Dynamic(_) => ModelKind::Dynamic,
            Self::Turbine(_) => ModelKind::Turbine,
        }
    }

    /// Type-erased handle used by the entity managers for cascades
    pub fn as_model_manager(&self) -> Arc<dyn ModelManager> {
        match self {
            Self::Basic(m) => Arc::clone(m) as Arc<dyn ModelManager>,
            Self::Dynamic(m) => Arc::clone(m) as Arc<dyn ModelManager>,
            Self::Turbine(m) => Arc::clone(m) as Arc<dyn ModelManager>,
        }
    }

    pub fn basic(&self) -> Result<&BasicModelManager> {
        match self {
            Self::Basic(m) => Ok(m),
            other => Err(other.wrong_model(ModelKind::Basic)),
        }
    }

    pub fn dynamic(&self) -> Result<&DynamicModelManager> {
        match self {
            Self::Dynamic(m) => Ok(m),
            other => Err(other.wrong_model(ModelKind::Dynamic)),
        }
    }

    pub fn turbine(&self) -> Result<&TurbineModelManager> {
        match self {
            Self::Turbine(m) => Ok(m),
            other => Err(other.wrong_model(ModelKind::Turbine)),
        }
    }

    fn wrong_model(&self, requested: ModelKind) -> SecurityError {
        SecurityError::access_control(format!(
            "The {} model manager is not available, the active model is {}",
            requested,
            self.model()
        ))
    }
}
