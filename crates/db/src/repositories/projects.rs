//! Project lookups.

use async_trait::async_trait;
use sea_orm::{EntityTrait, QueryOrder};
use sitebook_core::ledger::{ProjectDirectory, ProjectRecord, SourceError};
use sitebook_shared::types::{Money, ProjectId};

use super::SeaOrmStore;
use crate::entities::projects;

impl From<projects::Model> for ProjectRecord {
    fn from(model: projects::Model) -> Self {
        Self {
            id: ProjectId::from(model.id),
            name: model.name,
            budget: Money::new(model.budget),
            status: model.status.into(),
        }
    }
}

#[async_trait]
impl ProjectDirectory for SeaOrmStore {
    async fn project_name(&self, id: ProjectId) -> Result<Option<String>, SourceError> {
        let project = projects::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?;
        Ok(project.map(|project| project.name))
    }

    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, SourceError> {
        let rows = projects::Entity::find()
            .order_by_asc(projects::Column::Name)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(ProjectRecord::from).collect())
    }
}
