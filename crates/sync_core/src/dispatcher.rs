use std::{fmt, str::FromStr, sync::Arc};

use shared::{
    domain::{Campus, CampusId, Student, StudentId},
    protocol::{CampusDraft, StudentDraft},
};
use tracing::{debug, info, warn};

use crate::{
    action::Action,
    remote::{RemoteDataService, RemoteResult},
    store::{Snapshot, Store},
};

/// What the dispatcher does after a successful add, edit or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPolicy {
    /// Re-fetch the mutated collection and any loaded record embedding the
    /// mutated entity.
    #[default]
    Refetch,
    /// Emit only the mutation's own action; embedded summaries stay stale until
    /// the next explicit fetch.
    Lazy,
}

impl FromStr for SyncPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "refetch" => Ok(Self::Refetch),
            "lazy" => Ok(Self::Lazy),
            other => Err(format!("unknown sync policy '{other}' (expected refetch or lazy)")),
        }
    }
}

impl fmt::Display for SyncPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncPolicy::Refetch => f.write_str("refetch"),
            SyncPolicy::Lazy => f.write_str("lazy"),
        }
    }
}

/// Follow-up fetches owed after a mutation.
#[derive(Debug, Default, PartialEq, Eq)]
struct Refresh {
    campus: Option<CampusId>,
    student: Option<StudentId>,
    all_campuses: bool,
    all_students: bool,
}

impl Refresh {
    fn campus_changed(snapshot: &Snapshot, id: CampusId) -> Self {
        Self {
            student: snapshot
                .student
                .as_ref()
                .filter(|s| s.enrolled_campus() == Some(id))
                .map(|s| s.id),
            all_students: snapshot
                .all_students
                .iter()
                .any(|s| s.enrolled_campus() == Some(id)),
            ..Self::default()
        }
    }

    /// `campus` is the student's campus after the mutation, if any.
    fn student_changed(snapshot: &Snapshot, id: StudentId, campus: Option<CampusId>) -> Self {
        let affects = |c: &Campus| c.lists_student(id) || Some(c.id) == campus;
        Self {
            campus: snapshot.campus.as_ref().filter(|c| affects(*c)).map(|c| c.id),
            all_campuses: snapshot.all_campuses.iter().any(affects),
            ..Self::default()
        }
    }
}

/// Performs remote calls and feeds their results into the [`Store`].
///
/// Every operation emits exactly one action on success and none on failure;
/// errors come back to the caller as returned by the [`RemoteDataService`].
pub struct CommandDispatcher {
    service: Arc<dyn RemoteDataService>,
    store: Arc<Store>,
    policy: SyncPolicy,
}

impl CommandDispatcher {
    pub fn new(service: Arc<dyn RemoteDataService>, store: Arc<Store>) -> Self {
        Self {
            service,
            store,
            policy: SyncPolicy::default(),
        }
    }

    pub fn with_sync_policy(mut self, policy: SyncPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn sync_policy(&self) -> SyncPolicy {
        self.policy
    }

    pub async fn fetch_campus(&self, id: CampusId) -> RemoteResult<Campus> {
        let campus = self
            .service
            .get_campus(id)
            .await
            .inspect_err(|err| warn!(campus_id = id.0, "fetch campus failed: {err}"))?;
        self.store.dispatch(Action::FetchCampus(campus.clone()));
        Ok(campus)
    }

    pub async fn fetch_all_campuses(&self) -> RemoteResult<Vec<Campus>> {
        let campuses = self
            .service
            .list_campuses()
            .await
            .inspect_err(|err| warn!("fetch campuses failed: {err}"))?;
        self.store
            .dispatch(Action::FetchAllCampuses(campuses.clone()));
        Ok(campuses)
    }

    /// Creates a campus and returns it with its backend-assigned id.
    pub async fn add_campus(&self, draft: &CampusDraft) -> RemoteResult<Campus> {
        let campus = self
            .service
            .create_campus(draft)
            .await
            .inspect_err(|err| warn!("add campus failed: {err}"))?;
        info!(campus_id = campus.id.0, name = %campus.name, "campus added");
        self.store.dispatch(Action::AddCampus(campus.clone()));

        self.reconcile(Refresh {
            all_campuses: true,
            ..Refresh::default()
        })
        .await;
        Ok(campus)
    }

    pub async fn edit_campus(&self, id: CampusId, draft: &CampusDraft) -> RemoteResult<Campus> {
        let campus = self
            .service
            .update_campus(id, draft)
            .await
            .inspect_err(|err| warn!(campus_id = id.0, "edit campus failed: {err}"))?;
        info!(campus_id = campus.id.0, "campus edited");
        let snapshot = self.store.dispatch(Action::EditCampus(campus.clone()));

        self.reconcile(Refresh {
            all_campuses: true,
            ..Refresh::campus_changed(&snapshot, campus.id)
        })
        .await;
        Ok(campus)
    }

    pub async fn delete_campus(&self, id: CampusId) -> RemoteResult<CampusId> {
        let deleted = self
            .service
            .delete_campus(id)
            .await
            .inspect_err(|err| warn!(campus_id = id.0, "delete campus failed: {err}"))?;
        info!(campus_id = deleted.0, "campus deleted");
        let snapshot = self.store.dispatch(Action::DeleteCampus(deleted));

        self.reconcile(Refresh::campus_changed(&snapshot, deleted))
            .await;
        Ok(deleted)
    }

    pub async fn fetch_student(&self, id: StudentId) -> RemoteResult<Student> {
        let student = self
            .service
            .get_student(id)
            .await
            .inspect_err(|err| warn!(student_id = id.0, "fetch student failed: {err}"))?;
        self.store.dispatch(Action::FetchStudent(student.clone()));
        Ok(student)
    }

    pub async fn fetch_all_students(&self) -> RemoteResult<Vec<Student>> {
        let students = self
            .service
            .list_students()
            .await
            .inspect_err(|err| warn!("fetch students failed: {err}"))?;
        self.store
            .dispatch(Action::FetchAllStudents(students.clone()));
        Ok(students)
    }

    /// Creates a student and returns it with its backend-assigned id.
    pub async fn add_student(&self, draft: &StudentDraft) -> RemoteResult<Student> {
        let student = self
            .service
            .create_student(draft)
            .await
            .inspect_err(|err| warn!("add student failed: {err}"))?;
        info!(student_id = student.id.0, name = %student.full_name(), "student added");
        let snapshot = self.store.dispatch(Action::AddStudent(student.clone()));

        self.reconcile(Refresh {
            all_students: true,
            ..Refresh::student_changed(&snapshot, student.id, student.enrolled_campus())
        })
        .await;
        Ok(student)
    }

    pub async fn edit_student(&self, id: StudentId, draft: &StudentDraft) -> RemoteResult<Student> {
        let student = self
            .service
            .update_student(id, draft)
            .await
            .inspect_err(|err| warn!(student_id = id.0, "edit student failed: {err}"))?;
        info!(student_id = student.id.0, "student edited");
        let snapshot = self.store.dispatch(Action::EditStudent(student.clone()));

        self.reconcile(Refresh {
            all_students: true,
            ..Refresh::student_changed(&snapshot, student.id, student.enrolled_campus())
        })
        .await;
        Ok(student)
    }

    pub async fn delete_student(&self, id: StudentId) -> RemoteResult<StudentId> {
        let deleted = self
            .service
            .delete_student(id)
            .await
            .inspect_err(|err| warn!(student_id = id.0, "delete student failed: {err}"))?;
        info!(student_id = deleted.0, "student deleted");
        let snapshot = self.store.dispatch(Action::DeleteStudent(deleted));

        self.reconcile(Refresh::student_changed(&snapshot, deleted, None))
            .await;
        Ok(deleted)
    }

    /// Runs follow-up fetches one after another. A failed follow-up is logged
    /// and does not undo or fail the mutation that triggered it.
    async fn reconcile(&self, refresh: Refresh) {
        if self.policy == SyncPolicy::Lazy {
            return;
        }

        if refresh.all_campuses {
            if let Err(err) = self.fetch_all_campuses().await {
                warn!("sync: campus list refresh failed: {err}");
            }
        }
        if refresh.all_students {
            if let Err(err) = self.fetch_all_students().await {
                warn!("sync: student list refresh failed: {err}");
            }
        }
        if let Some(id) = refresh.campus {
            if let Err(err) = self.refresh_open_campus(id).await {
                warn!(campus_id = id.0, "sync: campus refresh failed: {err}");
            }
        }
        if let Some(id) = refresh.student {
            if let Err(err) = self.refresh_open_student(id).await {
                warn!(student_id = id.0, "sync: student refresh failed: {err}");
            }
        }
    }

    /// Reloads the open campus unless another one was opened in the meantime.
    async fn refresh_open_campus(&self, id: CampusId) -> RemoteResult<()> {
        if self.store.snapshot().campus_id() != Some(id) {
            return Ok(());
        }
        let campus = self.service.get_campus(id).await?;
        if self.store.snapshot().campus_id() != Some(id) {
            debug!(campus_id = id.0, "sync: open campus changed, dropping refresh");
            return Ok(());
        }
        self.store.dispatch(Action::FetchCampus(campus));
        Ok(())
    }

    /// Reloads the open student unless another one was opened in the meantime.
    async fn refresh_open_student(&self, id: StudentId) -> RemoteResult<()> {
        if self.store.snapshot().student_id() != Some(id) {
            return Ok(());
        }
        let student = self.service.get_student(id).await?;
        if self.store.snapshot().student_id() != Some(id) {
            debug!(student_id = id.0, "sync: open student changed, dropping refresh");
            return Ok(());
        }
        self.store.dispatch(Action::FetchStudent(student));
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/dispatcher_tests.rs"]
mod tests;
