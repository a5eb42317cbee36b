use crate::entities::{prelude::*, venues};
use crate::models::{Venue, VenueForm};
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::info;

use super::name_contains;

pub struct VenueRepository {
    conn: DatabaseConnection,
}

impl VenueRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: venues::Model) -> Venue {
        Venue {
            id: model.id,
            name: model.name,
            city: model.city,
            state: model.state,
            address: model.address,
            phone: model.phone,
            image_link: model.image_link,
            facebook_link: model.facebook_link,
            genres: model.genres,
            website: model.website,
            seeking_talent: model.seeking_talent,
            seeking_description: model.seeking_description,
        }
    }

    /// Writes every form field onto `active`, overwriting what was there.
    fn apply_form(active: &mut venues::ActiveModel, form: &VenueForm) {
        active.name = Set(form.name.clone());
        active.city = Set(form.city.clone());
        active.state = Set(form.state.clone());
        active.address = Set(form.address.clone());
        active.phone = Set(form.phone.clone());
        active.image_link = Set(form.image_link.clone());
        active.facebook_link = Set(form.facebook_link.clone());
        active.genres = Set(form.genres.clone());
        active.website = Set(form.website.clone());
        active.seeking_talent = Set(form.seeking_talent);
        active.seeking_description = Set(form.seeking_description.clone());
    }

    pub async fn get(&self, id: i32) -> Result<Option<Venue>> {
        let model = Venues::find_by_id(id).one(&self.conn).await?;
        Ok(model.map(Self::map_model))
    }

    pub async fn list_all(&self) -> Result<Vec<Venue>> {
        let rows = Venues::find()
            .order_by_asc(venues::Column::State)
            .order_by_asc(venues::Column::City)
            .order_by_asc(venues::Column::Name)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn search_by_name(&self, term: &str) -> Result<Vec<Venue>> {
        let rows = Venues::find()
            .filter(name_contains(venues::Column::Name, term))
            .order_by_asc(venues::Column::Name)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn list_recent(&self, limit: u64) -> Result<Vec<Venue>> {
        let rows = Venues::find()
            .order_by_desc(venues::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().map(Self::map_model).collect())
    }

    pub async fn list_names(&self) -> Result<Vec<(i32, String)>> {
        let rows = Venues::find()
            .select_only()
            .column(venues::Column::Id)
            .column(venues::Column::Name)
            .order_by_asc(venues::Column::Name)
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Venues::find().count(&self.conn).await?)
    }

    pub async fn add(&self, form: &VenueForm) -> Result<Venue> {
        let txn = self.conn.begin().await?;

        let mut active = <venues::ActiveModel as ActiveModelTrait>::default();
        Self::apply_form(&mut active, form);
        let model = active.insert(&txn).await?;

        txn.commit().await?;

        info!("Added venue {}: {}", model.id, model.name);
        Ok(Self::map_model(model))
    }

    /// Replaces every column of venue `id`. Returns `None` when it does not exist.
    pub async fn update(&self, id: i32, form: &VenueForm) -> Result<Option<Venue>> {
        let txn = self.conn.begin().await?;

        let Some(existing) = Venues::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut active: venues::ActiveModel = existing.into();
        Self::apply_form(&mut active, form);
        let model = active.update(&txn).await?;

        txn.commit().await?;

        info!("Updated venue {}: {}", model.id, model.name);
        Ok(Some(Self::map_model(model)))
    }

    /// Deletes venue `id`; its shows go with it through the foreign key cascade.
    pub async fn remove(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let result = Venues::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed venue with ID: {}", id);
        }
        Ok(removed)
    }
}
