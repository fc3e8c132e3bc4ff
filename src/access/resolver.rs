//! The resolver itself: role gate, then the ownership gate for the caller's
//! role. Stateless per call; ownership comes from an [`OwnershipLookup`].

use uuid::Uuid;

use super::{AccessDenied, AccessError, Action, Principal, ResourceKind, Role, Scope, Target};

/// Ownership-graph reads the resolver needs. The production implementation
/// is backed by sea-orm ([`super::OwnershipStore`]); tests use an in-memory
/// map.
pub trait OwnershipLookup {
    /// Teacher that created the student, if the student exists.
    fn student_owner(
        &self,
        student_id: Uuid,
    ) -> impl Future<Output = anyhow::Result<Option<Uuid>>> + Send;

    /// Teacher that owns the class, if the class exists.
    fn class_owner(
        &self,
        class_id: Uuid,
    ) -> impl Future<Output = anyhow::Result<Option<Uuid>>> + Send;

    /// Teacher that owns the graded student, if the grade exists. Grade
    /// ownership follows the student's `created_by`, not the recording
    /// teacher.
    fn grade_owner(
        &self,
        grade_id: Uuid,
    ) -> impl Future<Output = anyhow::Result<Option<Uuid>>> + Send;

    /// Student ids linked to the parent. Empty when none are linked.
    fn children_of(
        &self,
        parent_id: Uuid,
    ) -> impl Future<Output = anyhow::Result<Vec<Uuid>>> + Send;
}

/// Role allow-list check (Rule 1). Pure; exercised on every authorize call.
pub fn role_gate(role: Role, action: Action) -> Result<(), AccessDenied> {
    if action.allowed_roles().contains(&role) {
        Ok(())
    } else {
        Err(AccessDenied::RoleForbidden { role })
    }
}

pub struct AccessResolver<L> {
    lookup: L,
}

impl<L: OwnershipLookup> AccessResolver<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Authorizes `action` against `target` for `principal`, returning the
    /// scope filter to narrow the caller's query.
    pub async fn authorize(
        &self,
        principal: &Principal,
        action: Action,
        target: Target,
    ) -> Result<Scope, AccessError> {
        role_gate(principal.role, action)?;

        match principal.role {
            Role::Teacher => self.teacher_scope(principal, target).await,
            Role::Student => student_scope(principal, target).map_err(AccessError::from),
            Role::Parent => self.parent_scope(principal, target).await,
        }
    }

    /// Rule 2: a teacher touches only records whose owning teacher is the
    /// caller. Missing and foreign records are distinguished internally but
    /// both leave this function as a denial.
    async fn teacher_scope(
        &self,
        principal: &Principal,
        target: Target,
    ) -> Result<Scope, AccessError> {
        let teacher_id = principal.profile_id;

        let (resource, owner) = match target {
            Target::None => return Ok(Scope::TeacherOwned(teacher_id)),
            Target::Student(id) => (
                ResourceKind::Student,
                self.lookup.student_owner(id).await?,
            ),
            Target::Class(id) => (ResourceKind::Class, self.lookup.class_owner(id).await?),
            Target::Grade(id) => (ResourceKind::Grade, self.lookup.grade_owner(id).await?),
        };

        match owner {
            None => Err(AccessDenied::NotFound { resource }.into()),
            Some(owner) if owner != teacher_id => {
                Err(AccessDenied::NotOwner { resource }.into())
            }
            Some(_) => Ok(Scope::TeacherOwned(teacher_id)),
        }
    }

    /// Rule 3: parents read only students present in their children set.
    async fn parent_scope(
        &self,
        principal: &Principal,
        target: Target,
    ) -> Result<Scope, AccessError> {
        let children = self.lookup.children_of(principal.profile_id).await?;

        match target {
            Target::None => Ok(Scope::LinkedChildren(children)),
            Target::Student(id) if children.contains(&id) => Ok(Scope::LinkedChildren(children)),
            Target::Student(_) | Target::Class(_) | Target::Grade(_) => {
                Err(AccessDenied::NotLinked.into())
            }
        }
    }
}

/// Rule 4: a student reads only itself. Pure; no lookup needed.
fn student_scope(principal: &Principal, target: Target) -> Result<Scope, AccessDenied> {
    match target {
        Target::None => Ok(Scope::SelfStudent(principal.profile_id)),
        Target::Student(id) if id == principal.profile_id => Ok(Scope::SelfStudent(id)),
        Target::Student(_) => Err(AccessDenied::NotOwner {
            resource: ResourceKind::Student,
        }),
        Target::Class(_) => Err(AccessDenied::NotOwner {
            resource: ResourceKind::Class,
        }),
        Target::Grade(_) => Err(AccessDenied::NotOwner {
            resource: ResourceKind::Grade,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::http::StatusCode;
    use uuid::Uuid;

    use super::*;

    #[derive(Default)]
    struct MemoryOwnership {
        students: HashMap<Uuid, Uuid>,
        classes: HashMap<Uuid, Uuid>,
        grades: HashMap<Uuid, Uuid>,
        children: HashMap<Uuid, Vec<Uuid>>,
    }

    impl OwnershipLookup for MemoryOwnership {
        async fn student_owner(&self, student_id: Uuid) -> anyhow::Result<Option<Uuid>> {
            Ok(self.students.get(&student_id).copied())
        }

        async fn class_owner(&self, class_id: Uuid) -> anyhow::Result<Option<Uuid>> {
            Ok(self.classes.get(&class_id).copied())
        }

        async fn grade_owner(&self, grade_id: Uuid) -> anyhow::Result<Option<Uuid>> {
            Ok(self.grades.get(&grade_id).copied())
        }

        async fn children_of(&self, parent_id: Uuid) -> anyhow::Result<Vec<Uuid>> {
            Ok(self.children.get(&parent_id).cloned().unwrap_or_default())
        }
    }

    fn principal(role: Role, profile_id: Uuid) -> Principal {
        Principal {
            user_id: Uuid::new_v4(),
            role,
            profile_id,
        }
    }

    fn denied(result: Result<Scope, AccessError>) -> AccessDenied {
        match result {
            Err(AccessError::Denied(denied)) => denied,
            other => panic!("expected denial, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn owning_teacher_reads_own_student() {
        let t1 = Uuid::new_v4();
        let student = Uuid::new_v4();
        let mut store = MemoryOwnership::default();
        store.students.insert(student, t1);

        let resolver = AccessResolver::new(store);
        let scope = resolver
            .authorize(
                &principal(Role::Teacher, t1),
                Action::ReadStudent,
                Target::Student(student),
            )
            .await
            .unwrap();

        assert_eq!(scope, Scope::TeacherOwned(t1));
    }

    #[tokio::test]
    async fn foreign_teacher_is_denied_without_leaking_existence() {
        let t1 = Uuid::new_v4();
        let t2 = Uuid::new_v4();
        let student = Uuid::new_v4();
        let mut store = MemoryOwnership::default();
        store.students.insert(student, t1);

        let resolver = AccessResolver::new(store);
        let reason = denied(
            resolver
                .authorize(
                    &principal(Role::Teacher, t2),
                    Action::ReadStudent,
                    Target::Student(student),
                )
                .await,
        );

        assert_eq!(
            reason,
            AccessDenied::NotOwner {
                resource: ResourceKind::Student
            }
        );
        // Surfaces exactly like a missing record
        let missing = AccessDenied::NotFound {
            resource: ResourceKind::Student,
        };
        assert_eq!(reason.status(), StatusCode::NOT_FOUND);
        assert_eq!(reason.status(), missing.status());
        assert_eq!(reason.public_message(), missing.public_message());
    }

    #[tokio::test]
    async fn missing_student_is_not_found() {
        let resolver = AccessResolver::new(MemoryOwnership::default());
        let reason = denied(
            resolver
                .authorize(
                    &principal(Role::Teacher, Uuid::new_v4()),
                    Action::UpdateStudent,
                    Target::Student(Uuid::new_v4()),
                )
                .await,
        );
        assert_eq!(
            reason,
            AccessDenied::NotFound {
                resource: ResourceKind::Student
            }
        );
    }

    #[tokio::test]
    async fn grade_ownership_follows_the_student_owner() {
        let t1 = Uuid::new_v4();
        let t2 = Uuid::new_v4();
        let grade = Uuid::new_v4();
        let mut store = MemoryOwnership::default();
        store.grades.insert(grade, t1);

        let resolver = AccessResolver::new(store);
        assert!(
            resolver
                .authorize(
                    &principal(Role::Teacher, t1),
                    Action::CorrectGrade,
                    Target::Grade(grade),
                )
                .await
                .is_ok()
        );
        let reason = denied(
            resolver
                .authorize(
                    &principal(Role::Teacher, t2),
                    Action::CorrectGrade,
                    Target::Grade(grade),
                )
                .await,
        );
        assert_eq!(reason.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_actions_narrow_to_the_calling_teacher() {
        let t1 = Uuid::new_v4();
        let resolver = AccessResolver::new(MemoryOwnership::default());
        let scope = resolver
            .authorize(&principal(Role::Teacher, t1), Action::ListStudents, Target::None)
            .await
            .unwrap();
        assert_eq!(scope.teacher_id(), Some(t1));
    }

    #[tokio::test]
    async fn linked_parent_reads_child_grades() {
        let parent = Uuid::new_v4();
        let s1 = Uuid::new_v4();
        let mut store = MemoryOwnership::default();
        store.children.insert(parent, vec![s1]);

        let resolver = AccessResolver::new(store);
        let scope = resolver
            .authorize(
                &principal(Role::Parent, parent),
                Action::ReadStudentGrades,
                Target::Student(s1),
            )
            .await
            .unwrap();

        assert!(scope.permits_student(s1));
    }

    #[tokio::test]
    async fn unlinked_parent_is_denied_for_any_other_student() {
        let parent = Uuid::new_v4();
        let s1 = Uuid::new_v4();
        let s2 = Uuid::new_v4();
        let mut store = MemoryOwnership::default();
        store.children.insert(parent, vec![s1]);

        let resolver = AccessResolver::new(store);
        let reason = denied(
            resolver
                .authorize(
                    &principal(Role::Parent, parent),
                    Action::ReadStudentGrades,
                    Target::Student(s2),
                )
                .await,
        );
        assert_eq!(reason, AccessDenied::NotLinked);
        assert_eq!(reason.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn student_never_writes_grades_regardless_of_target() {
        let student = Uuid::new_v4();
        let resolver = AccessResolver::new(MemoryOwnership::default());

        for target in [
            Target::None,
            Target::Student(student),
            Target::Student(Uuid::new_v4()),
            Target::Grade(Uuid::new_v4()),
        ] {
            let reason = denied(
                resolver
                    .authorize(&principal(Role::Student, student), Action::RecordGrade, target)
                    .await,
            );
            assert_eq!(
                reason,
                AccessDenied::RoleForbidden {
                    role: Role::Student
                }
            );
        }
    }

    #[tokio::test]
    async fn student_reads_only_itself() {
        let student = Uuid::new_v4();
        let resolver = AccessResolver::new(MemoryOwnership::default());

        let scope = resolver
            .authorize(
                &principal(Role::Student, student),
                Action::ReadStudentGrades,
                Target::Student(student),
            )
            .await
            .unwrap();
        assert_eq!(scope, Scope::SelfStudent(student));

        let reason = denied(
            resolver
                .authorize(
                    &principal(Role::Student, student),
                    Action::ReadStudentGrades,
                    Target::Student(Uuid::new_v4()),
                )
                .await,
        );
        assert_eq!(reason.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn role_gate_covers_the_whole_matrix() {
        // Teacher-only actions reject the other two roles
        for action in [
            Action::CreateStudent,
            Action::DeleteStudent,
            Action::RecordGrade,
            Action::DeleteGrade,
            Action::CreateClass,
            Action::CreateSubject,
            Action::CreateParent,
        ] {
            assert!(role_gate(Role::Teacher, action).is_ok());
            assert!(role_gate(Role::Student, action).is_err());
            assert!(role_gate(Role::Parent, action).is_err());
        }

        assert!(role_gate(Role::Parent, Action::ReadLinkedChildren).is_ok());
        assert!(role_gate(Role::Student, Action::ReadLinkedChildren).is_err());
        assert!(role_gate(Role::Student, Action::StudentDashboard).is_ok());
        assert!(role_gate(Role::Teacher, Action::StudentDashboard).is_err());
    }
}
