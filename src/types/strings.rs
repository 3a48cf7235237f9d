use aliri_braid::braid;

/// Compute Engine task ID, e.g. `AVAn5RKqYwETbXvgas-I`
#[braid(serde)]
pub struct TaskId;

/// User login
#[braid(serde)]
pub struct Login;

/// Key of a project, branch-independent, e.g. `my_project`
#[braid(serde)]
pub struct ComponentKey;

/// Key of a plugin, e.g. `java`
#[braid(serde)]
pub struct PluginKey;

/// Key of a setting, e.g. `sonar.links.scm`
#[braid(serde)]
pub struct SettingKey;

/// Date-time as formatted by SonarQube, e.g. `2017-03-01T10:30:00+0100`.
///
/// Not RFC 3339: the UTC offset has no colon.
#[braid(serde)]
pub struct DateTimeString;
