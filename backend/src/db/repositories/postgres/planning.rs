//! Weekly schedule and materials on Postgres.

use async_trait::async_trait;
use diesel::prelude::*;

use super::models::*;
use super::schema::*;
use super::PostgresRepository;
use crate::api::*;
use crate::db::repository::{
    MaterialRepository, RepositoryError, RepositoryResult, ScheduleRepository,
};

fn entry_from_row(row: ScheduleRow) -> RepositoryResult<ScheduleEntry> {
    let day = row.day.parse::<Weekday>().map_err(|e| {
        RepositoryError::internal(format!("Stored schedule entry {}: {}", row.id, e))
    })?;
    Ok(ScheduleEntry {
        id: ScheduleEntryId(row.id),
        day,
        time: row.time,
        activity: row.activity,
        duration: row.duration,
        students: row.students_group,
    })
}

fn schedule_changes(user: UserId, entry: &ScheduleEntryInput) -> ScheduleChanges<'_> {
    ScheduleChanges {
        user_id: user.0,
        day: entry.day.as_str(),
        time: &entry.time,
        activity: &entry.activity,
        duration: entry.duration,
        students_group: &entry.students,
    }
}

fn material_from_row(row: MaterialRow) -> Material {
    Material {
        id: MaterialId(row.id),
        name: row.name,
        category: row.category,
        age_range: row.age_range.unwrap_or_default(),
        description: row.description.unwrap_or_default(),
        in_stock: row.in_stock,
        times_used: row.times_used,
    }
}

#[async_trait]
impl ScheduleRepository for PostgresRepository {
    async fn list_schedule(&self, user: UserId) -> RepositoryResult<Vec<ScheduleEntry>> {
        self.with_conn(move |conn| {
            let rows = schedules::table
                .filter(schedules::user_id.eq(user.0))
                .order(schedules::id.asc())
                .select(ScheduleRow::as_select())
                .load::<ScheduleRow>(conn)?;
            let mut entries = rows
                .into_iter()
                .map(entry_from_row)
                .collect::<RepositoryResult<Vec<_>>>()?;
            // Day is stored as text, so weekday order is applied here.
            entries.sort_by_key(|e| (e.day, e.id));
            Ok(entries)
        })
        .await
    }

    async fn create_schedule_entry(
        &self,
        user: UserId,
        entry: &ScheduleEntryInput,
    ) -> RepositoryResult<ScheduleEntry> {
        let entry = entry.clone();
        self.with_conn(move |conn| {
            let row = diesel::insert_into(schedules::table)
                .values(&schedule_changes(user, &entry))
                .returning(ScheduleRow::as_returning())
                .get_result(conn)?;
            entry_from_row(row)
        })
        .await
    }

    async fn update_schedule_entry(
        &self,
        user: UserId,
        id: ScheduleEntryId,
        entry: &ScheduleEntryInput,
    ) -> RepositoryResult<ScheduleEntry> {
        let entry = entry.clone();
        self.with_conn(move |conn| {
            let row = diesel::update(
                schedules::table
                    .filter(schedules::id.eq(id.0))
                    .filter(schedules::user_id.eq(user.0)),
            )
            .set(&schedule_changes(user, &entry))
            .returning(ScheduleRow::as_returning())
            .get_result(conn)
            .optional()?
            .ok_or_else(|| RepositoryError::missing("schedule entry", id))?;
            entry_from_row(row)
        })
        .await
    }

    async fn delete_schedule_entry(
        &self,
        user: UserId,
        id: ScheduleEntryId,
    ) -> RepositoryResult<()> {
        self.with_conn(move |conn| {
            let deleted = diesel::delete(
                schedules::table
                    .filter(schedules::id.eq(id.0))
                    .filter(schedules::user_id.eq(user.0)),
            )
            .execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::missing("schedule entry", id));
            }
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl MaterialRepository for PostgresRepository {
    async fn list_materials(&self, user: UserId) -> RepositoryResult<Vec<Material>> {
        self.with_conn(move |conn| {
            let rows = materials::table
                .filter(materials::user_id.eq(user.0))
                .order(materials::id.asc())
                .select(MaterialRow::as_select())
                .load::<MaterialRow>(conn)?;
            Ok(rows.into_iter().map(material_from_row).collect())
        })
        .await
    }

    async fn create_material(
        &self,
        user: UserId,
        material: &MaterialInput,
    ) -> RepositoryResult<Material> {
        let material = material.clone();
        self.with_conn(move |conn| {
            let row = diesel::insert_into(materials::table)
                .values(&MaterialChanges {
                    user_id: user.0,
                    name: &material.name,
                    category: &material.category,
                    age_range: non_empty(&material.age_range),
                    description: non_empty(&material.description),
                    in_stock: material.in_stock,
                    times_used: 0,
                })
                .returning(MaterialRow::as_returning())
                .get_result(conn)?;
            Ok(material_from_row(row))
        })
        .await
    }

    async fn update_material(
        &self,
        user: UserId,
        id: MaterialId,
        material: &MaterialUpdate,
    ) -> RepositoryResult<Material> {
        let material = material.clone();
        self.with_conn(move |conn| {
            let row = diesel::update(
                materials::table
                    .filter(materials::id.eq(id.0))
                    .filter(materials::user_id.eq(user.0)),
            )
            .set(&MaterialChanges {
                user_id: user.0,
                name: &material.name,
                category: &material.category,
                age_range: non_empty(&material.age_range),
                description: non_empty(&material.description),
                in_stock: material.in_stock,
                times_used: material.times_used,
            })
            .returning(MaterialRow::as_returning())
            .get_result(conn)
            .optional()?
            .ok_or_else(|| RepositoryError::missing("material", id))?;
            Ok(material_from_row(row))
        })
        .await
    }

    async fn increment_material_usage(
        &self,
        user: UserId,
        id: MaterialId,
    ) -> RepositoryResult<Material> {
        self.with_conn(move |conn| {
            let owned = materials::table
                .filter(materials::id.eq(id.0))
                .filter(materials::user_id.eq(user.0));
            let updated = diesel::update(owned.clone().filter(materials::times_used.lt(i32::MAX)))
                .set(materials::times_used.eq(materials::times_used + 1))
                .returning(MaterialRow::as_returning())
                .get_result(conn)
                .optional()?;
            match updated {
                Some(row) => Ok(material_from_row(row)),
                None => {
                    let exists: bool =
                        diesel::select(diesel::dsl::exists(owned)).get_result(conn)?;
                    if exists {
                        Err(RepositoryError::conflict(format!(
                            "material {} usage counter is full",
                            id
                        )))
                    } else {
                        Err(RepositoryError::missing("material", id))
                    }
                }
            }
        })
        .await
    }

    async fn delete_material(&self, user: UserId, id: MaterialId) -> RepositoryResult<()> {
        self.with_conn(move |conn| {
            let deleted = diesel::delete(
                materials::table
                    .filter(materials::id.eq(id.0))
                    .filter(materials::user_id.eq(user.0)),
            )
            .execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::missing("material", id));
            }
            Ok(())
        })
        .await
    }
}
