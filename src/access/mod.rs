//! Role-scoped access control.
//!
//! Every protected endpoint builds a [`Principal`] from the verified token,
//! names its [`Action`] and [`Target`], and asks the resolver for a
//! [`Scope`]. The scope is applied at query-construction time so list
//! endpoints are narrowed before they hit the database, not filtered after.

pub mod resolver;
pub mod store;

use std::fmt;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::RoleEnum;

pub use resolver::{AccessResolver, OwnershipLookup};
pub use store::OwnershipStore;

/// Caller roles. Closed set: adding a role is a compile-time-checked change
/// through the exhaustive matches below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
    Parent,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Teacher => "teacher",
            Role::Student => "student",
            Role::Parent => "parent",
        };
        f.write_str(s)
    }
}

impl From<RoleEnum> for Role {
    fn from(role: RoleEnum) -> Self {
        match role {
            RoleEnum::Teacher => Role::Teacher,
            RoleEnum::Student => Role::Student,
            RoleEnum::Parent => Role::Parent,
        }
    }
}

impl From<Role> for RoleEnum {
    fn from(role: Role) -> Self {
        match role {
            Role::Teacher => RoleEnum::Teacher,
            Role::Student => RoleEnum::Student,
            Role::Parent => RoleEnum::Parent,
        }
    }
}

/// The authenticated caller for one request. `profile_id` is the id of the
/// role-specific record the account owns (teacher, student or parent id).
/// Immutable for the request's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub role: Role,
    pub profile_id: Uuid,
}

/// Every protected operation the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateStudent,
    ListStudents,
    ReadStudent,
    UpdateStudent,
    DeleteStudent,
    RecordGrade,
    CorrectGrade,
    DeleteGrade,
    ReadStudentGrades,
    ClassAverages,
    CreateClass,
    ListClasses,
    UpdateClass,
    AssignStudentToClass,
    CreateSubject,
    ListSubjects,
    UpdateSubject,
    DeleteSubject,
    CreateParent,
    ListParents,
    ReadOwnProfile,
    ReadLinkedChildren,
    TeacherDashboard,
    StudentDashboard,
    ParentDashboard,
}

impl Action {
    /// Static role allow-list (Rule 1). Grade writes never list `student`.
    pub fn allowed_roles(self) -> &'static [Role] {
        match self {
            Action::CreateStudent
            | Action::ListStudents
            | Action::ReadStudent
            | Action::UpdateStudent
            | Action::DeleteStudent
            | Action::RecordGrade
            | Action::CorrectGrade
            | Action::DeleteGrade
            | Action::ClassAverages
            | Action::CreateClass
            | Action::ListClasses
            | Action::UpdateClass
            | Action::AssignStudentToClass
            | Action::CreateSubject
            | Action::ListSubjects
            | Action::UpdateSubject
            | Action::DeleteSubject
            | Action::CreateParent
            | Action::ListParents
            | Action::TeacherDashboard => &[Role::Teacher],
            Action::ReadStudentGrades => &[Role::Teacher, Role::Student, Role::Parent],
            Action::ReadOwnProfile => &[Role::Student, Role::Parent],
            Action::ReadLinkedChildren | Action::ParentDashboard => &[Role::Parent],
            Action::StudentDashboard => &[Role::Student],
        }
    }
}

/// The concrete record an action is aimed at, when there is one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    None,
    Student(Uuid),
    Class(Uuid),
    Grade(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Student,
    Class,
    Grade,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResourceKind::Student => "Student",
            ResourceKind::Class => "Class",
            ResourceKind::Grade => "Grade",
        };
        f.write_str(s)
    }
}

/// Denial reasons. `NotOwner` and `NotFound` stay distinct internally but
/// surface with the same status and body, so callers cannot probe which
/// records exist under another teacher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDenied {
    RoleForbidden { role: Role },
    NotOwner { resource: ResourceKind },
    NotLinked,
    NotFound { resource: ResourceKind },
}

impl AccessDenied {
    pub fn status(&self) -> StatusCode {
        match self {
            AccessDenied::RoleForbidden { .. } | AccessDenied::NotLinked => StatusCode::FORBIDDEN,
            AccessDenied::NotOwner { .. } | AccessDenied::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn public_message(&self) -> String {
        match self {
            AccessDenied::RoleForbidden { role } => {
                format!("Access forbidden for {} role", role)
            }
            AccessDenied::NotLinked => "Unauthorized access to child data".to_string(),
            AccessDenied::NotOwner { resource } | AccessDenied::NotFound { resource } => {
                format!("{} not found", resource)
            }
        }
    }
}

impl fmt::Display for AccessDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.public_message())
    }
}

impl std::error::Error for AccessDenied {}

/// Query narrowing handed back on Allow. Applied by the repositories when
/// building list queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Restrict to records created by this teacher.
    TeacherOwned(Uuid),
    /// Restrict to the student's own records.
    SelfStudent(Uuid),
    /// Restrict to the parent's linked children.
    LinkedChildren(Vec<Uuid>),
}

impl Scope {
    pub fn teacher_id(&self) -> Option<Uuid> {
        match self {
            Scope::TeacherOwned(id) => Some(*id),
            _ => None,
        }
    }

    pub fn permits_student(&self, student_id: Uuid) -> bool {
        match self {
            Scope::TeacherOwned(_) => true,
            Scope::SelfStudent(id) => *id == student_id,
            Scope::LinkedChildren(children) => children.contains(&student_id),
        }
    }
}

/// Resolver outcome: a denial, or a lookup failure underneath it.
#[derive(Debug)]
pub enum AccessError {
    Denied(AccessDenied),
    Internal(anyhow::Error),
}

impl AccessError {
    pub fn into_response(self) -> (StatusCode, String) {
        match self {
            AccessError::Denied(denied) => (denied.status(), denied.public_message()),
            AccessError::Internal(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Authorization lookup failed: {}", err),
            ),
        }
    }
}

impl From<AccessDenied> for AccessError {
    fn from(denied: AccessDenied) -> Self {
        AccessError::Denied(denied)
    }
}

impl From<anyhow::Error> for AccessError {
    fn from(err: anyhow::Error) -> Self {
        AccessError::Internal(err)
    }
}
