//! Build events as delivered by the build server.

use serde::{Deserialize, Serialize};

use crate::command::EarPose;
use crate::commits::{self, Modification};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    BuildStarted,
    BuildSuccessful,
    BuildFailed,
    BuildFailedToStart,
    LabelingFailed,
    BuildFailing,
    BuildProbablyHanging,
    ResponsibilityChanged,
    ResponsibilityAssigned,
}

impl EventKind {
    pub const ALL: [EventKind; 9] = [
        Self::BuildStarted,
        Self::BuildSuccessful,
        Self::BuildFailed,
        Self::BuildFailedToStart,
        Self::LabelingFailed,
        Self::BuildFailing,
        Self::BuildProbablyHanging,
        Self::ResponsibilityChanged,
        Self::ResponsibilityAssigned,
    ];

    pub fn ear_pose(self) -> Option<EarPose> {
        match self {
            Self::BuildSuccessful => Some(EarPose::Happy),
            Self::BuildFailed
            | Self::BuildFailedToStart
            | Self::LabelingFailed
            | Self::BuildFailing
            | Self::BuildProbablyHanging => Some(EarPose::Sad),
            Self::BuildStarted | Self::ResponsibilityChanged | Self::ResponsibilityAssigned => None,
        }
    }

    pub fn default_template(self) -> &'static str {
        match self {
            Self::BuildStarted => "Build #PROJECT# started.",
            Self::BuildSuccessful => "Build #PROJECT# successfull.",
            Self::BuildFailed => "Build #PROJECT# failed.",
            Self::BuildFailedToStart => "Start Build #PROJECT# failed.",
            Self::LabelingFailed => "Labeling of build #PROJECT# failed.",
            Self::BuildFailing => "Build #PROJECT# is failing.",
            Self::BuildProbablyHanging => "Build #PROJECT# is probably hanging.",
            Self::ResponsibilityChanged => "Responsibility of build #PROJECT# changed.",
            Self::ResponsibilityAssigned => "#USER# is assigned responsible for build #PROJECT#.",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::BuildStarted => "build started",
            Self::BuildSuccessful => "build successful",
            Self::BuildFailed => "build failed",
            Self::BuildFailedToStart => "build failed to start",
            Self::LabelingFailed => "labeling failed",
            Self::BuildFailing => "build failing",
            Self::BuildProbablyHanging => "build probably hanging",
            Self::ResponsibilityChanged => "responsibility changed",
            Self::ResponsibilityAssigned => "responsibility assigned",
        };
        f.write_str(name)
    }
}

/// Changes that went into a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildChanges {
    /// Set when a user started the build by hand.
    pub triggered_by: Option<String>,
    pub committers: Vec<String>,
    pub modifications: Vec<Modification>,
}

/// Responsibility for a build configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Responsibility {
    pub user: String,
    pub comment: String,
}

/// Responsibility for one or more tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestResponsibility {
    pub user: String,
    pub test_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSubject {
    Changes(BuildChanges),
    Responsibility(Responsibility),
    TestResponsibility(TestResponsibility),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildEvent {
    pub kind: EventKind,
    pub project: String,
    #[serde(flatten)]
    pub subject: EventSubject,
}

impl BuildEvent {
    pub fn build(kind: EventKind, project: impl Into<String>, changes: BuildChanges) -> Self {
        Self {
            kind,
            project: project.into(),
            subject: EventSubject::Changes(changes),
        }
    }

    pub fn responsibility(
        kind: EventKind,
        project: impl Into<String>,
        user: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            project: project.into(),
            subject: EventSubject::Responsibility(Responsibility {
                user: user.into(),
                comment: comment.into(),
            }),
        }
    }

    /// Value substituted for `#USER#`.
    pub fn user_names(&self) -> String {
        match &self.subject {
            EventSubject::Changes(changes) => commits::join_user_names(
                changes.triggered_by.as_deref(),
                &changes.committers,
                &changes.modifications,
            ),
            EventSubject::Responsibility(r) => r.user.clone(),
            EventSubject::TestResponsibility(r) => r.user.clone(),
        }
    }

    /// Value substituted for `#COMMENT#`.
    pub fn comments(&self) -> String {
        match &self.subject {
            EventSubject::Changes(changes) => commits::join_comments(&changes.modifications),
            EventSubject::Responsibility(r) => r.comment.clone(),
            EventSubject::TestResponsibility(r) => commits::join_test_names(&r.test_names),
        }
    }
}
