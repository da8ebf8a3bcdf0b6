//! In-memory local repository implementation.
//!
//! Stores every table in ordered maps behind a single reader-writer lock.
//! Ids come from per-table counters that never go backwards, and deletes
//! cascade the same way the relational schema does.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::api::*;
use crate::db::repository::*;

/// In-memory local repository.
///
/// Cloning is cheap and clones share the same data.
///
/// # Example
/// ```
/// use monty::db::repositories::LocalRepository;
/// use monty::db::repository::StudentRepository;
/// use monty::api::{StudentInput, UserId};
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// rt.block_on(async {
///     let repo = LocalRepository::new();
///     let input = StudentInput { name: "Emma".into(), age: 5, ..Default::default() };
///     repo.create_student(UserId(1), &input).await.unwrap();
///     assert_eq!(repo.list_students(UserId(1)).await.unwrap().len(), 1);
/// });
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct StudentRow {
    user: UserId,
    student: Student,
}

struct ObservationRow {
    student_id: StudentId,
    date: NaiveDate,
    area: String,
    skills: Vec<String>,
    notes: String,
}

struct DailyEntryRow {
    user: UserId,
    student_id: StudentId,
    date: NaiveDate,
    subject: String,
    activities: Vec<String>,
    skill_level: String,
    notes: String,
}

#[derive(Default)]
struct Sequences {
    user: i64,
    student: i64,
    observation: i64,
    schedule: i64,
    material: i64,
    daily_entry: i64,
}

fn next(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

struct LocalData {
    users: BTreeMap<UserId, User>,
    settings: HashMap<UserId, Value>,
    students: BTreeMap<StudentId, StudentRow>,
    observations: BTreeMap<ObservationId, ObservationRow>,
    schedule: BTreeMap<ScheduleEntryId, (UserId, ScheduleEntry)>,
    materials: BTreeMap<MaterialId, (UserId, Material)>,
    daily_entries: BTreeMap<DailyEntryId, DailyEntryRow>,

    sequences: Sequences,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            settings: HashMap::new(),
            students: BTreeMap::new(),
            observations: BTreeMap::new(),
            schedule: BTreeMap::new(),
            materials: BTreeMap::new(),
            daily_entries: BTreeMap::new(),
            sequences: Sequences::default(),
            is_healthy: true,
        }
    }
}

impl LocalData {
    fn owned_student(&self, user: UserId, id: StudentId) -> RepositoryResult<&Student> {
        self.students
            .get(&id)
            .filter(|row| row.user == user)
            .map(|row| &row.student)
            .ok_or_else(|| RepositoryError::missing("student", id))
    }

    fn student_name(&self, id: StudentId) -> String {
        self.students
            .get(&id)
            .map(|row| row.student.name.clone())
            .unwrap_or_default()
    }

    fn observation_owner(&self, row: &ObservationRow) -> Option<UserId> {
        self.students.get(&row.student_id).map(|s| s.user)
    }

    fn observation(&self, id: ObservationId, row: &ObservationRow) -> Observation {
        Observation {
            id,
            student_id: row.student_id,
            student: self.student_name(row.student_id),
            date: row.date,
            area: row.area.clone(),
            skills: row.skills.clone(),
            notes: row.notes.clone(),
        }
    }

    fn daily_entry(&self, id: DailyEntryId, row: &DailyEntryRow) -> DailyEntry {
        DailyEntry {
            id,
            student_id: row.student_id,
            student: self.student_name(row.student_id),
            date: row.date,
            subject: row.subject.clone(),
            activities: row.activities.clone(),
            skill_level: row.skill_level.clone(),
            notes: row.notes.clone(),
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Drop all rows but keep the health flag. Id counters restart.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    pub fn student_count(&self) -> usize {
        self.data.read().students.len()
    }

    pub fn observation_count(&self) -> usize {
        self.data.read().observations.len()
    }

    pub fn daily_entry_count(&self) -> usize {
        self.data.read().daily_entries.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection("Database is not healthy"));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn create_user(&self, user: &NewUser) -> RepositoryResult<User> {
        self.check_health()?;
        let mut data = self.data.write();
        if data.users.values().any(|u| u.username == user.username) {
            return Err(RepositoryError::conflict(format!(
                "Username '{}' is already taken",
                user.username
            )));
        }

        let id = UserId(next(&mut data.sequences.user));
        let stored = User {
            id,
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            school: user.school.clone(),
            classroom: user.classroom.clone(),
            created_at: Utc::now(),
        };
        data.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        self.check_health()?;
        let data = self.data.read();
        Ok(data
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn get_user(&self, id: UserId) -> RepositoryResult<Option<User>> {
        self.check_health()?;
        Ok(self.data.read().users.get(&id).cloned())
    }

    async fn count_users(&self) -> RepositoryResult<i64> {
        self.check_health()?;
        Ok(self.data.read().users.len() as i64)
    }
}

#[async_trait]
impl SettingsRepository for LocalRepository {
    async fn get_settings(&self, user: UserId) -> RepositoryResult<Option<Value>> {
        self.check_health()?;
        Ok(self.data.read().settings.get(&user).cloned())
    }

    async fn save_settings(&self, user: UserId, settings: &Value) -> RepositoryResult<Value> {
        self.check_health()?;
        self.data.write().settings.insert(user, settings.clone());
        Ok(settings.clone())
    }
}

#[async_trait]
impl StudentRepository for LocalRepository {
    async fn list_students(&self, user: UserId) -> RepositoryResult<Vec<Student>> {
        self.check_health()?;
        let data = self.data.read();
        Ok(data
            .students
            .values()
            .filter(|row| row.user == user)
            .map(|row| row.student.clone())
            .collect())
    }

    async fn get_student(&self, user: UserId, id: StudentId) -> RepositoryResult<Student> {
        self.check_health()?;
        self.data.read().owned_student(user, id).cloned()
    }

    async fn find_student_by_name(
        &self,
        user: UserId,
        name: &str,
    ) -> RepositoryResult<Option<Student>> {
        self.check_health()?;
        let data = self.data.read();
        Ok(data
            .students
            .values()
            .find(|row| row.user == user && row.student.name == name)
            .map(|row| row.student.clone()))
    }

    async fn create_student(
        &self,
        user: UserId,
        input: &StudentInput,
    ) -> RepositoryResult<Student> {
        self.check_health()?;
        let mut data = self.data.write();
        let id = StudentId(next(&mut data.sequences.student));
        let student = Student {
            id,
            name: input.name.clone(),
            age: input.age,
            interests: input.interests.clone(),
            allergies: input.allergies.clone(),
            parent_name: input.parent_name.clone(),
            parent_email: input.parent_email.clone(),
        };
        data.students.insert(
            id,
            StudentRow {
                user,
                student: student.clone(),
            },
        );
        Ok(student)
    }

    async fn update_student(
        &self,
        user: UserId,
        id: StudentId,
        input: &StudentInput,
    ) -> RepositoryResult<Student> {
        self.check_health()?;
        let mut data = self.data.write();
        let row = data
            .students
            .get_mut(&id)
            .filter(|row| row.user == user)
            .ok_or_else(|| RepositoryError::missing("student", id))?;

        row.student = Student {
            id,
            name: input.name.clone(),
            age: input.age,
            interests: input.interests.clone(),
            allergies: input.allergies.clone(),
            parent_name: input.parent_name.clone(),
            parent_email: input.parent_email.clone(),
        };
        Ok(row.student.clone())
    }

    async fn delete_student(&self, user: UserId, id: StudentId) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write();
        data.owned_student(user, id)?;

        data.students.remove(&id);
        data.observations.retain(|_, row| row.student_id != id);
        data.daily_entries.retain(|_, row| row.student_id != id);
        Ok(())
    }
}

#[async_trait]
impl ObservationRepository for LocalRepository {
    async fn list_observations(&self, user: UserId) -> RepositoryResult<Vec<Observation>> {
        self.check_health()?;
        let data = self.data.read();
        let mut observations: Vec<Observation> = data
            .observations
            .iter()
            .filter(|(_, row)| data.observation_owner(row) == Some(user))
            .map(|(id, row)| data.observation(*id, row))
            .collect();
        observations.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(observations)
    }

    async fn get_observation(
        &self,
        user: UserId,
        id: ObservationId,
    ) -> RepositoryResult<Observation> {
        self.check_health()?;
        let data = self.data.read();
        data.observations
            .get(&id)
            .filter(|row| data.observation_owner(row) == Some(user))
            .map(|row| data.observation(id, row))
            .ok_or_else(|| RepositoryError::missing("observation", id))
    }

    async fn create_observation(
        &self,
        user: UserId,
        observation: &NewObservation,
    ) -> RepositoryResult<Observation> {
        self.check_health()?;
        let mut data = self.data.write();
        data.owned_student(user, observation.student_id)?;

        let id = ObservationId(next(&mut data.sequences.observation));
        let row = ObservationRow {
            student_id: observation.student_id,
            date: observation.date,
            area: observation.area.clone(),
            skills: observation.skills.clone(),
            notes: observation.notes.clone(),
        };
        let created = data.observation(id, &row);
        data.observations.insert(id, row);
        Ok(created)
    }

    async fn update_observation(
        &self,
        user: UserId,
        id: ObservationId,
        observation: &NewObservation,
    ) -> RepositoryResult<Observation> {
        self.check_health()?;
        let mut data = self.data.write();
        let owner = data
            .observations
            .get(&id)
            .and_then(|row| data.observation_owner(row));
        if owner != Some(user) {
            return Err(RepositoryError::missing("observation", id));
        }
        data.owned_student(user, observation.student_id)?;

        let row = ObservationRow {
            student_id: observation.student_id,
            date: observation.date,
            area: observation.area.clone(),
            skills: observation.skills.clone(),
            notes: observation.notes.clone(),
        };
        let updated = data.observation(id, &row);
        data.observations.insert(id, row);
        Ok(updated)
    }

    async fn delete_observation(&self, user: UserId, id: ObservationId) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write();
        let owner = data
            .observations
            .get(&id)
            .and_then(|row| data.observation_owner(row));
        if owner != Some(user) {
            return Err(RepositoryError::missing("observation", id));
        }
        data.observations.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl DailyEntryRepository for LocalRepository {
    async fn list_daily_entries(&self, user: UserId) -> RepositoryResult<Vec<DailyEntry>> {
        self.check_health()?;
        let data = self.data.read();
        let mut entries: Vec<DailyEntry> = data
            .daily_entries
            .iter()
            .filter(|(_, row)| row.user == user)
            .map(|(id, row)| data.daily_entry(*id, row))
            .collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(entries)
    }

    async fn get_daily_entry(&self, user: UserId, id: DailyEntryId) -> RepositoryResult<DailyEntry> {
        self.check_health()?;
        let data = self.data.read();
        data.daily_entries
            .get(&id)
            .filter(|row| row.user == user)
            .map(|row| data.daily_entry(id, row))
            .ok_or_else(|| RepositoryError::missing("daily entry", id))
    }

    async fn create_daily_entry(
        &self,
        user: UserId,
        entry: &NewDailyEntry,
    ) -> RepositoryResult<DailyEntry> {
        self.check_health()?;
        let mut data = self.data.write();
        data.owned_student(user, entry.student_id)?;

        let id = DailyEntryId(next(&mut data.sequences.daily_entry));
        let row = DailyEntryRow {
            user,
            student_id: entry.student_id,
            date: entry.date,
            subject: entry.subject.clone(),
            activities: entry.activities.clone(),
            skill_level: entry.skill_level.clone(),
            notes: entry.notes.clone(),
        };
        let created = data.daily_entry(id, &row);
        data.daily_entries.insert(id, row);
        Ok(created)
    }

    async fn update_daily_entry(
        &self,
        user: UserId,
        id: DailyEntryId,
        entry: &NewDailyEntry,
    ) -> RepositoryResult<DailyEntry> {
        self.check_health()?;
        let mut data = self.data.write();
        if !data
            .daily_entries
            .get(&id)
            .is_some_and(|row| row.user == user)
        {
            return Err(RepositoryError::missing("daily entry", id));
        }
        data.owned_student(user, entry.student_id)?;

        let row = DailyEntryRow {
            user,
            student_id: entry.student_id,
            date: entry.date,
            subject: entry.subject.clone(),
            activities: entry.activities.clone(),
            skill_level: entry.skill_level.clone(),
            notes: entry.notes.clone(),
        };
        let updated = data.daily_entry(id, &row);
        data.daily_entries.insert(id, row);
        Ok(updated)
    }

    async fn delete_daily_entry(&self, user: UserId, id: DailyEntryId) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write();
        if !data
            .daily_entries
            .get(&id)
            .is_some_and(|row| row.user == user)
        {
            return Err(RepositoryError::missing("daily entry", id));
        }
        data.daily_entries.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl ScheduleRepository for LocalRepository {
    async fn list_schedule(&self, user: UserId) -> RepositoryResult<Vec<ScheduleEntry>> {
        self.check_health()?;
        let data = self.data.read();
        let mut entries: Vec<ScheduleEntry> = data
            .schedule
            .values()
            .filter(|(owner, _)| *owner == user)
            .map(|(_, entry)| entry.clone())
            .collect();
        entries.sort_by_key(|e| (e.day, e.id));
        Ok(entries)
    }

    async fn create_schedule_entry(
        &self,
        user: UserId,
        entry: &ScheduleEntryInput,
    ) -> RepositoryResult<ScheduleEntry> {
        self.check_health()?;
        let mut data = self.data.write();
        let id = ScheduleEntryId(next(&mut data.sequences.schedule));
        let stored = ScheduleEntry {
            id,
            day: entry.day,
            time: entry.time.clone(),
            activity: entry.activity.clone(),
            duration: entry.duration,
            students: entry.students.clone(),
        };
        data.schedule.insert(id, (user, stored.clone()));
        Ok(stored)
    }

    async fn update_schedule_entry(
        &self,
        user: UserId,
        id: ScheduleEntryId,
        entry: &ScheduleEntryInput,
    ) -> RepositoryResult<ScheduleEntry> {
        self.check_health()?;
        let mut data = self.data.write();
        match data.schedule.get_mut(&id) {
            Some((owner, stored)) if *owner == user => {
                *stored = ScheduleEntry {
                    id,
                    day: entry.day,
                    time: entry.time.clone(),
                    activity: entry.activity.clone(),
                    duration: entry.duration,
                    students: entry.students.clone(),
                };
                Ok(stored.clone())
            }
            _ => Err(RepositoryError::missing("schedule entry", id)),
        }
    }

    async fn delete_schedule_entry(
        &self,
        user: UserId,
        id: ScheduleEntryId,
    ) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write();
        if !data.schedule.get(&id).is_some_and(|(owner, _)| *owner == user) {
            return Err(RepositoryError::missing("schedule entry", id));
        }
        data.schedule.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl MaterialRepository for LocalRepository {
    async fn list_materials(&self, user: UserId) -> RepositoryResult<Vec<Material>> {
        self.check_health()?;
        let data = self.data.read();
        Ok(data
            .materials
            .values()
            .filter(|(owner, _)| *owner == user)
            .map(|(_, material)| material.clone())
            .collect())
    }

    async fn create_material(
        &self,
        user: UserId,
        material: &MaterialInput,
    ) -> RepositoryResult<Material> {
        self.check_health()?;
        let mut data = self.data.write();
        let id = MaterialId(next(&mut data.sequences.material));
        let stored = Material {
            id,
            name: material.name.clone(),
            category: material.category.clone(),
            age_range: material.age_range.clone(),
            description: material.description.clone(),
            in_stock: material.in_stock,
            times_used: 0,
        };
        data.materials.insert(id, (user, stored.clone()));
        Ok(stored)
    }

    async fn update_material(
        &self,
        user: UserId,
        id: MaterialId,
        material: &MaterialUpdate,
    ) -> RepositoryResult<Material> {
        self.check_health()?;
        let mut data = self.data.write();
        match data.materials.get_mut(&id) {
            Some((owner, stored)) if *owner == user => {
                *stored = Material {
                    id,
                    name: material.name.clone(),
                    category: material.category.clone(),
                    age_range: material.age_range.clone(),
                    description: material.description.clone(),
                    in_stock: material.in_stock,
                    times_used: material.times_used,
                };
                Ok(stored.clone())
            }
            _ => Err(RepositoryError::missing("material", id)),
        }
    }

    async fn increment_material_usage(
        &self,
        user: UserId,
        id: MaterialId,
    ) -> RepositoryResult<Material> {
        self.check_health()?;
        let mut data = self.data.write();
        match data.materials.get_mut(&id) {
            Some((owner, stored)) if *owner == user => {
                stored.times_used = stored.times_used.checked_add(1).ok_or_else(|| {
                    RepositoryError::conflict(format!("material {} usage counter is full", id))
                })?;
                Ok(stored.clone())
            }
            _ => Err(RepositoryError::missing("material", id)),
        }
    }

    async fn delete_material(&self, user: UserId, id: MaterialId) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write();
        if !data.materials.get(&id).is_some_and(|(owner, _)| *owner == user) {
            return Err(RepositoryError::missing("material", id));
        }
        data.materials.remove(&id);
        Ok(())
    }
}
