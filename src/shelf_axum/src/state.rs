use shelf_adapters::{BearerTokenValidator, JwtScheme, JwtTokenService};
use shelf_core::{BookStore, PasswordHasher, UserStore};

/// What routes need from the application state.
///
/// Routes are generic over this trait rather than over each store, so the
/// service can run on Postgres in production and on in-memory stores in tests.
pub trait ShelfState: Clone + Send + Sync + 'static {
    type Users: UserStore + Clone + 'static;
    type Books: BookStore + Clone + 'static;
    type Hasher: PasswordHasher + Clone + 'static;

    fn scheme(&self) -> &JwtScheme<Self::Users, Self::Hasher>;

    fn books(&self) -> &Self::Books;

    fn users(&self) -> &Self::Users {
        self.scheme().user_store()
    }

    fn hasher(&self) -> &Self::Hasher {
        self.scheme().hasher()
    }

    fn validator(&self) -> &BearerTokenValidator<Self::Users, JwtTokenService> {
        self.scheme().validator()
    }
}

#[derive(Clone)]
pub struct AppState<U, B, H> {
    scheme: JwtScheme<U, H>,
    books: B,
}

impl<U, B, H> AppState<U, B, H> {
    pub fn new(scheme: JwtScheme<U, H>, books: B) -> Self {
        Self { scheme, books }
    }
}

impl<U, B, H> ShelfState for AppState<U, B, H>
where
    U: UserStore + Clone + 'static,
    B: BookStore + Clone + 'static,
    H: PasswordHasher + Clone + 'static,
{
    type Users = U;
    type Books = B;
    type Hasher = H;

    fn scheme(&self) -> &JwtScheme<U, H> {
        &self.scheme
    }

    fn books(&self) -> &B {
        &self.books
    }
}
