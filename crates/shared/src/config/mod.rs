mod database;
mod jwt;
mod myconfig;

pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::jwt::{Claims, JwtConfig, ROLE_SUPER_ADMIN};
pub use self::myconfig::{CloudinaryConfig, Config};
