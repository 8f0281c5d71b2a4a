/// A page the application can navigate to.
///
/// Nothing below the page controllers navigates; they return a `Route` and
/// the shell performs the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The unauthenticated entry point.
    Landing,
    /// Login and registration.
    Auth,
    Dashboard,
    Courses,
    Blogs,
    Dictionary,
    Subscription,
}

impl Route {
    /// The page path this route maps to.
    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "index.html",
            Route::Auth => "auth.html",
            Route::Dashboard => "dashboard.html",
            Route::Courses => "courses.html",
            Route::Blogs => "blogs.html",
            Route::Dictionary => "dictionary.html",
            Route::Subscription => "subscription.html",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
