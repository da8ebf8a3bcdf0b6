//! Students, observations and daily entries on Postgres.

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

use super::models::*;
use super::schema::*;
use super::PostgresRepository;
use crate::api::*;
use crate::db::repository::{
    DailyEntryRepository, ObservationRepository, RepositoryError, RepositoryResult,
    StudentRepository,
};

fn hydrate_students(conn: &mut PgConnection, rows: Vec<StudentRow>) -> QueryResult<Vec<Student>> {
    let interests = InterestRow::belonging_to(&rows)
        .select(InterestRow::as_select())
        .order(student_interests::id.asc())
        .load::<InterestRow>(conn)?
        .grouped_by(&rows);
    let allergies = AllergyRow::belonging_to(&rows)
        .select(AllergyRow::as_select())
        .order(student_allergies::id.asc())
        .load::<AllergyRow>(conn)?
        .grouped_by(&rows);

    Ok(rows
        .into_iter()
        .zip(interests)
        .zip(allergies)
        .map(|((row, interests), allergies)| Student {
            id: StudentId(row.id),
            name: row.name,
            age: row.age,
            interests: interests.into_iter().map(|i| i.interest).collect(),
            allergies: allergies.into_iter().map(|a| a.allergy).collect(),
            parent_name: row.parent_name.unwrap_or_default(),
            parent_email: row.parent_email.unwrap_or_default(),
        })
        .collect())
}

fn owned_student_row(
    conn: &mut PgConnection,
    user: UserId,
    id: StudentId,
) -> RepositoryResult<StudentRow> {
    students::table
        .filter(students::id.eq(id.0))
        .filter(students::user_id.eq(user.0))
        .select(StudentRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| RepositoryError::missing("student", id))
}

fn load_student(conn: &mut PgConnection, user: UserId, id: StudentId) -> RepositoryResult<Student> {
    let row = owned_student_row(conn, user, id)?;
    let mut students = hydrate_students(conn, vec![row])?;
    students
        .pop()
        .ok_or_else(|| RepositoryError::missing("student", id))
}

fn replace_student_lists(
    conn: &mut PgConnection,
    student_id: i64,
    input: &StudentInput,
) -> QueryResult<()> {
    diesel::delete(student_interests::table.filter(student_interests::student_id.eq(student_id)))
        .execute(conn)?;
    diesel::delete(student_allergies::table.filter(student_allergies::student_id.eq(student_id)))
        .execute(conn)?;

    let interests: Vec<NewInterestRow> = input
        .interests
        .iter()
        .map(|interest| NewInterestRow {
            student_id,
            interest,
        })
        .collect();
    if !interests.is_empty() {
        diesel::insert_into(student_interests::table)
            .values(&interests)
            .execute(conn)?;
    }

    let allergies: Vec<NewAllergyRow> = input
        .allergies
        .iter()
        .map(|allergy| NewAllergyRow {
            student_id,
            allergy,
        })
        .collect();
    if !allergies.is_empty() {
        diesel::insert_into(student_allergies::table)
            .values(&allergies)
            .execute(conn)?;
    }
    Ok(())
}

fn student_changes(user: UserId, input: &StudentInput) -> StudentChanges<'_> {
    StudentChanges {
        user_id: user.0,
        name: &input.name,
        age: input.age,
        parent_name: non_empty(&input.parent_name),
        parent_email: non_empty(&input.parent_email),
    }
}

#[async_trait]
impl StudentRepository for PostgresRepository {
    async fn list_students(&self, user: UserId) -> RepositoryResult<Vec<Student>> {
        self.with_conn(move |conn| {
            let rows = students::table
                .filter(students::user_id.eq(user.0))
                .order(students::id.asc())
                .select(StudentRow::as_select())
                .load::<StudentRow>(conn)?;
            Ok(hydrate_students(conn, rows)?)
        })
        .await
    }

    async fn get_student(&self, user: UserId, id: StudentId) -> RepositoryResult<Student> {
        self.with_conn(move |conn| load_student(conn, user, id))
            .await
    }

    async fn find_student_by_name(
        &self,
        user: UserId,
        name: &str,
    ) -> RepositoryResult<Option<Student>> {
        let name = name.to_string();
        self.with_conn(move |conn| {
            let row = students::table
                .filter(students::user_id.eq(user.0))
                .filter(students::name.eq(&name))
                .order(students::id.asc())
                .select(StudentRow::as_select())
                .first::<StudentRow>(conn)
                .optional()?;
            match row {
                Some(row) => Ok(hydrate_students(conn, vec![row])?.pop()),
                None => Ok(None),
            }
        })
        .await
    }

    async fn create_student(
        &self,
        user: UserId,
        input: &StudentInput,
    ) -> RepositoryResult<Student> {
        let input = input.clone();
        self.with_conn(move |conn| {
            conn.transaction(|tx| {
                let id: i64 = diesel::insert_into(students::table)
                    .values(&student_changes(user, &input))
                    .returning(students::id)
                    .get_result(tx)?;
                replace_student_lists(tx, id, &input)?;
                load_student(tx, user, StudentId(id))
            })
        })
        .await
    }

    async fn update_student(
        &self,
        user: UserId,
        id: StudentId,
        input: &StudentInput,
    ) -> RepositoryResult<Student> {
        let input = input.clone();
        self.with_conn(move |conn| {
            conn.transaction(|tx| {
                owned_student_row(tx, user, id)?;
                diesel::update(students::table.find(id.0))
                    .set(&student_changes(user, &input))
                    .execute(tx)?;
                replace_student_lists(tx, id.0, &input)?;
                load_student(tx, user, id)
            })
        })
        .await
    }

    async fn delete_student(&self, user: UserId, id: StudentId) -> RepositoryResult<()> {
        self.with_conn(move |conn| {
            let deleted = diesel::delete(
                students::table
                    .filter(students::id.eq(id.0))
                    .filter(students::user_id.eq(user.0)),
            )
            .execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::missing("student", id));
            }
            Ok(())
        })
        .await
    }
}

fn hydrate_observations(
    conn: &mut PgConnection,
    rows: Vec<(ObservationRow, String)>,
) -> QueryResult<Vec<Observation>> {
    let (rows, names): (Vec<ObservationRow>, Vec<String>) = rows.into_iter().unzip();
    let skills = SkillRow::belonging_to(&rows)
        .select(SkillRow::as_select())
        .order(observation_skills::id.asc())
        .load::<SkillRow>(conn)?
        .grouped_by(&rows);

    Ok(rows
        .into_iter()
        .zip(names)
        .zip(skills)
        .map(|((row, student), skills)| Observation {
            id: ObservationId(row.id),
            student_id: StudentId(row.student_id),
            student,
            date: row.date,
            area: row.area,
            skills: skills.into_iter().map(|s| s.skill).collect(),
            notes: row.notes.unwrap_or_default(),
        })
        .collect())
}

fn load_observation(
    conn: &mut PgConnection,
    user: UserId,
    id: ObservationId,
) -> RepositoryResult<Observation> {
    let row = observations::table
        .inner_join(students::table)
        .filter(observations::id.eq(id.0))
        .filter(students::user_id.eq(user.0))
        .select((ObservationRow::as_select(), students::name))
        .first::<(ObservationRow, String)>(conn)
        .optional()?
        .ok_or_else(|| RepositoryError::missing("observation", id))?;
    hydrate_observations(conn, vec![row])?
        .pop()
        .ok_or_else(|| RepositoryError::missing("observation", id))
}

fn replace_skills(conn: &mut PgConnection, observation_id: i64, skills: &[String]) -> QueryResult<()> {
    diesel::delete(
        observation_skills::table.filter(observation_skills::observation_id.eq(observation_id)),
    )
    .execute(conn)?;
    let rows: Vec<NewSkillRow> = skills
        .iter()
        .map(|skill| NewSkillRow {
            observation_id,
            skill,
        })
        .collect();
    if !rows.is_empty() {
        diesel::insert_into(observation_skills::table)
            .values(&rows)
            .execute(conn)?;
    }
    Ok(())
}

fn observation_changes(observation: &NewObservation) -> ObservationChanges<'_> {
    ObservationChanges {
        student_id: observation.student_id.0,
        date: observation.date,
        area: &observation.area,
        notes: non_empty(&observation.notes),
    }
}

#[async_trait]
impl ObservationRepository for PostgresRepository {
    async fn list_observations(&self, user: UserId) -> RepositoryResult<Vec<Observation>> {
        self.with_conn(move |conn| {
            let rows = observations::table
                .inner_join(students::table)
                .filter(students::user_id.eq(user.0))
                .order((observations::date.desc(), observations::id.desc()))
                .select((ObservationRow::as_select(), students::name))
                .load::<(ObservationRow, String)>(conn)?;
            Ok(hydrate_observations(conn, rows)?)
        })
        .await
    }

    async fn get_observation(
        &self,
        user: UserId,
        id: ObservationId,
    ) -> RepositoryResult<Observation> {
        self.with_conn(move |conn| load_observation(conn, user, id))
            .await
    }

    async fn create_observation(
        &self,
        user: UserId,
        observation: &NewObservation,
    ) -> RepositoryResult<Observation> {
        let observation = observation.clone();
        self.with_conn(move |conn| {
            conn.transaction(|tx| {
                owned_student_row(tx, user, observation.student_id)?;
                let id: i64 = diesel::insert_into(observations::table)
                    .values(&observation_changes(&observation))
                    .returning(observations::id)
                    .get_result(tx)?;
                replace_skills(tx, id, &observation.skills)?;
                load_observation(tx, user, ObservationId(id))
            })
        })
        .await
    }

    async fn update_observation(
        &self,
        user: UserId,
        id: ObservationId,
        observation: &NewObservation,
    ) -> RepositoryResult<Observation> {
        let observation = observation.clone();
        self.with_conn(move |conn| {
            conn.transaction(|tx| {
                load_observation(tx, user, id)?;
                owned_student_row(tx, user, observation.student_id)?;
                diesel::update(observations::table.find(id.0))
                    .set(&observation_changes(&observation))
                    .execute(tx)?;
                replace_skills(tx, id.0, &observation.skills)?;
                load_observation(tx, user, id)
            })
        })
        .await
    }

    async fn delete_observation(&self, user: UserId, id: ObservationId) -> RepositoryResult<()> {
        self.with_conn(move |conn| {
            let owned_students = students::table
                .filter(students::user_id.eq(user.0))
                .select(students::id);
            let deleted = diesel::delete(
                observations::table
                    .filter(observations::id.eq(id.0))
                    .filter(observations::student_id.eq_any(owned_students)),
            )
            .execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::missing("observation", id));
            }
            Ok(())
        })
        .await
    }
}

fn hydrate_daily_entries(
    conn: &mut PgConnection,
    rows: Vec<(DailyEntryRow, String)>,
) -> QueryResult<Vec<DailyEntry>> {
    let (rows, names): (Vec<DailyEntryRow>, Vec<String>) = rows.into_iter().unzip();
    let activities = ActivityRow::belonging_to(&rows)
        .select(ActivityRow::as_select())
        .order(daily_activities::id.asc())
        .load::<ActivityRow>(conn)?
        .grouped_by(&rows);

    Ok(rows
        .into_iter()
        .zip(names)
        .zip(activities)
        .map(|((row, student), activities)| DailyEntry {
            id: DailyEntryId(row.id),
            student_id: StudentId(row.student_id),
            student,
            date: row.date,
            subject: row.subject,
            activities: activities.into_iter().map(|a| a.activity).collect(),
            skill_level: row.skill_level,
            notes: row.notes.unwrap_or_default(),
        })
        .collect())
}

fn load_daily_entry(
    conn: &mut PgConnection,
    user: UserId,
    id: DailyEntryId,
) -> RepositoryResult<DailyEntry> {
    let row = daily_entries::table
        .inner_join(students::table)
        .filter(daily_entries::id.eq(id.0))
        .filter(daily_entries::user_id.eq(user.0))
        .select((DailyEntryRow::as_select(), students::name))
        .first::<(DailyEntryRow, String)>(conn)
        .optional()?
        .ok_or_else(|| RepositoryError::missing("daily entry", id))?;
    hydrate_daily_entries(conn, vec![row])?
        .pop()
        .ok_or_else(|| RepositoryError::missing("daily entry", id))
}

fn replace_activities(
    conn: &mut PgConnection,
    daily_entry_id: i64,
    activities: &[String],
) -> QueryResult<()> {
    diesel::delete(
        daily_activities::table.filter(daily_activities::daily_entry_id.eq(daily_entry_id)),
    )
    .execute(conn)?;
    let rows: Vec<NewActivityRow> = activities
        .iter()
        .map(|activity| NewActivityRow {
            daily_entry_id,
            activity,
        })
        .collect();
    if !rows.is_empty() {
        diesel::insert_into(daily_activities::table)
            .values(&rows)
            .execute(conn)?;
    }
    Ok(())
}

fn daily_entry_changes(user: UserId, entry: &NewDailyEntry) -> DailyEntryChanges<'_> {
    DailyEntryChanges {
        user_id: user.0,
        student_id: entry.student_id.0,
        date: entry.date,
        subject: &entry.subject,
        skill_level: &entry.skill_level,
        notes: non_empty(&entry.notes),
    }
}

#[async_trait]
impl DailyEntryRepository for PostgresRepository {
    async fn list_daily_entries(&self, user: UserId) -> RepositoryResult<Vec<DailyEntry>> {
        self.with_conn(move |conn| {
            let rows = daily_entries::table
                .inner_join(students::table)
                .filter(daily_entries::user_id.eq(user.0))
                .order((daily_entries::date.desc(), daily_entries::id.desc()))
                .select((DailyEntryRow::as_select(), students::name))
                .load::<(DailyEntryRow, String)>(conn)?;
            Ok(hydrate_daily_entries(conn, rows)?)
        })
        .await
    }

    async fn get_daily_entry(&self, user: UserId, id: DailyEntryId) -> RepositoryResult<DailyEntry> {
        self.with_conn(move |conn| load_daily_entry(conn, user, id))
            .await
    }

    async fn create_daily_entry(
        &self,
        user: UserId,
        entry: &NewDailyEntry,
    ) -> RepositoryResult<DailyEntry> {
        let entry = entry.clone();
        self.with_conn(move |conn| {
            conn.transaction(|tx| {
                owned_student_row(tx, user, entry.student_id)?;
                let id: i64 = diesel::insert_into(daily_entries::table)
                    .values(&daily_entry_changes(user, &entry))
                    .returning(daily_entries::id)
                    .get_result(tx)?;
                replace_activities(tx, id, &entry.activities)?;
                load_daily_entry(tx, user, DailyEntryId(id))
            })
        })
        .await
    }

    async fn update_daily_entry(
        &self,
        user: UserId,
        id: DailyEntryId,
        entry: &NewDailyEntry,
    ) -> RepositoryResult<DailyEntry> {
        let entry = entry.clone();
        self.with_conn(move |conn| {
            conn.transaction(|tx| {
                load_daily_entry(tx, user, id)?;
                owned_student_row(tx, user, entry.student_id)?;
                diesel::update(daily_entries::table.find(id.0))
                    .set(&daily_entry_changes(user, &entry))
                    .execute(tx)?;
                replace_activities(tx, id.0, &entry.activities)?;
                load_daily_entry(tx, user, id)
            })
        })
        .await
    }

    async fn delete_daily_entry(&self, user: UserId, id: DailyEntryId) -> RepositoryResult<()> {
        self.with_conn(move |conn| {
            let deleted = diesel::delete(
                daily_entries::table
                    .filter(daily_entries::id.eq(id.0))
                    .filter(daily_entries::user_id.eq(user.0)),
            )
            .execute(conn)?;
            if deleted == 0 {
                return Err(RepositoryError::missing("daily entry", id));
            }
            Ok(())
        })
        .await
    }
}
