use crate::entities::{prelude::*, artists};
use crate::models::{Artist, ArtistForm};
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::info;

use super::name_contains;

pub struct ArtistRepository {
    conn: DatabaseConnection,
}

impl ArtistRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: artists::Model) -> Artist {
        Artist {
            id: model.id,
            name: model.name,
            city: model.city,
            state: model.state,
            phone: model.phone,
            image_link: model.image_link,
            facebook_link: model.facebook_link,
            genres: model.genres,
            website: model.website,
            seeking_venue: model.seeking_venue,
            seeking_description: model.seeking_description,
        }
    }

    /// Writes every form field onto `active`, overwriting what was there.
    fn apply_form(active: &mut artists::ActiveModel, form: &ArtistForm) {
        active.name = Set(form.name.clone());
        active.city = Set(form.city.clone());
        active.state = Set(form.state.clone());
        active.phone = Set(form.phone.clone());
        active.image_link = Set(form.image_link.clone());
        active.facebook_link = Set(form.facebook_link.clone());
        active.genres = Set(form.genres.clone());
        active.website = Set(form.website.clone());
        active.seeking_venue = Set(form.seeking_venue);
        active.seeking_description = Set(form.seeking_description.clone());
    }

    pub async fn get(&self, id: i32) -> Result<Option<Artist>> {
        let model = Artists::find_by_id(id).one(&self.conn).await?;
        Ok(model.map(Self::map_model))
    }

    pub async fn list_all(&self) -> Result<Vec<Artist>> {
        let rows = Artists::find()
            .order_by_asc(artists::Column::Name)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn search_by_name(&self, term: &str) -> Result<Vec<Artist>> {
        let rows = Artists::find()
            .filter(name_contains(artists::Column::Name, term))
            .order_by_asc(artists::Column::Name)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn list_recent(&self, limit: u64) -> Result<Vec<Artist>> {
        let rows = Artists::find()
            .order_by_desc(artists::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn list_names(&self) -> Result<Vec<(i32, String)>> {
        let rows = Artists::find()
            .select_only()
            .column(artists::Column::Id)
            .column(artists::Column::Name)
            .order_by_asc(artists::Column::Name)
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Artists::find().count(&self.conn).await?)
    }

    pub async fn add(&self, form: &ArtistForm) -> Result<Artist> {
        let txn = self.conn.begin().await?;

        let mut active = <artists::ActiveModel as ActiveModelTrait>::default();
        Self::apply_form(&mut active, form);
        let model = active.insert(&txn).await?;

        txn.commit().await?;

        info!("Added artist {}: {}", model.id, model.name);
        Ok(Self::map_model(model))
    }

    pub async fn update(&self, id: i32, form: &ArtistForm) -> Result<Option<Artist>> {
        let txn = self.conn.begin().await?;

        let Some(existing) = Artists::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut active: artists::ActiveModel = existing.into();
        Self::apply_form(&mut active, form);
        let model = active.update(&txn).await?;

        txn.commit().await?;

        info!("Updated artist {}: {}", model.id, model.name);
        Ok(Some(Self::map_model(model)))
    }

    pub async fn remove(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let result = Artists::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed artist with ID: {}", id);
        }
        Ok(removed)
    }
}
