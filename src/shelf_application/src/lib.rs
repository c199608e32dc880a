pub mod use_cases;

pub use use_cases::{
    books::{
        BOOK_SORT_COLUMNS, CreateBookUseCase, DeleteBookUseCase, GetBookUseCase,
        ListBooksUseCase, UpdateBookUseCase,
    },
    errors::{AuthError, BookError, UserManagementError},
    get_profile::GetProfileUseCase,
    login::LoginUseCase,
    register::{AuthSession, RegisterUseCase},
    resolve_identity::ResolveIdentityUseCase,
    users::{
        DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, USER_SORT_COLUMNS,
        UpdateUserUseCase, UserUpdate,
    },
};
