//! CheckMyGrade CLI
//!
//! Command-line interface over a CheckMyGrade data directory.

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use checkmygrade::records::CourseUpdate;
use checkmygrade::security::{ShiftCipher, TextCipher};
use checkmygrade::{
    Config, Course, GradeBook, Professor, Result, Role, SortOrder, Student, StudentUpdate,
};

/// CheckMyGrade CLI
#[derive(Parser, Debug)]
#[command(name = "checkmygrade")]
#[command(about = "Manage student, course and professor records stored as CSV tables")]
#[command(version)]
struct Cli {
    /// Data directory holding the table files
    #[arg(short, long, default_value = ".")]
    data_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Student records
    #[command(subcommand)]
    Student(StudentCommand),

    /// Course records
    #[command(subcommand)]
    Course(CourseCommand),

    /// Professor records
    #[command(subcommand)]
    Professor(ProfessorCommand),

    /// Mean/median/mode of marks per course
    Stats {
        /// Only this course
        #[arg(short, long)]
        course: Option<String>,
    },

    /// Course-, professor- and student-wise grade report
    Report {
        /// Number of student rows to include
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Login credentials
    #[command(subcommand)]
    Login(LoginCommand),

    /// Shift-cipher demonstration text
    #[command(subcommand)]
    Cipher(CipherCommand),
}

#[derive(Args, Debug)]
struct NewStudent {
    email: String,
    first_name: String,
    last_name: String,
    course_id: String,
    professor_email: String,
    grade: String,
    marks: String,
}

#[derive(Subcommand, Debug)]
enum StudentCommand {
    /// Add a student (skipped if the email exists)
    Add(NewStudent),

    /// Look up a student by email
    Search { email: String },

    /// Change course, grade or marks
    Update {
        email: String,
        #[arg(long)]
        course: Option<String>,
        #[arg(long)]
        grade: Option<String>,
        #[arg(long)]
        marks: Option<String>,
    },

    /// Delete a student by email
    Delete { email: String },

    /// Sort the table and print it
    Sort {
        #[arg(value_enum, default_value = "marks")]
        by: SortKey,
        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum SortKey {
    Marks,
    Email,
    Name,
}

#[derive(Subcommand, Debug)]
enum CourseCommand {
    Add {
        course_id: String,
        course_name: String,
        description: String,
    },
    Update {
        course_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        course_id: String,
    },
    List,
}

#[derive(Subcommand, Debug)]
enum ProfessorCommand {
    Add {
        email: String,
        name: String,
        rank: String,
        course_id: String,
    },
    /// Change a professor's rank
    Rank {
        email: String,
        rank: String,
    },
    Delete {
        email: String,
    },
    List,
}

#[derive(Subcommand, Debug)]
enum LoginCommand {
    Register {
        email: String,
        password: String,
        role: String,
    },
    Verify {
        email: String,
        password: String,
    },
}

#[derive(Subcommand, Debug)]
enum CipherCommand {
    Encrypt { text: String },
    Decrypt { text: String },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,checkmygrade=debug"));

    // Logs go to stderr so command output stays pipeable
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::builder().data_dir(&cli.data_dir).build();

    let book = match GradeBook::open(config) {
        Ok(b) => b,
        Err(e) => {
            tracing::error!("Failed to open grade book: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&book, cli.command) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(book: &GradeBook, command: Commands) -> Result<()> {
    match command {
        Commands::Student(cmd) => run_student(book, cmd),
        Commands::Course(cmd) => run_course(book, cmd),
        Commands::Professor(cmd) => run_professor(book, cmd),
        Commands::Stats { course } => {
            match course {
                Some(course_id) => match book.students().course_statistics(&course_id)? {
                    Some(stats) => println!("{}", stats),
                    None => println!("No students found for course {}.", course_id),
                },
                None => {
                    let all = book.students().all_courses_statistics()?;
                    if all.is_empty() {
                        println!("No student data available.");
                    }
                    for stats in all {
                        println!("{}", stats);
                    }
                }
            }
            Ok(())
        }
        Commands::Report { limit } => {
            let report = book.write_report(limit)?;
            print!("{}", report);
            Ok(())
        }
        Commands::Login(cmd) => run_login(book, cmd),
        Commands::Cipher(cmd) => {
            let cipher = ShiftCipher::default();
            match cmd {
                CipherCommand::Encrypt { text } => println!("{}", cipher.encrypt(&text)),
                CipherCommand::Decrypt { text } => println!("{}", cipher.decrypt(&text)),
            }
            Ok(())
        }
    }
}

fn run_student(book: &GradeBook, cmd: StudentCommand) -> Result<()> {
    let students = book.students();
    match cmd {
        StudentCommand::Add(new) => {
            let student = Student::new(
                new.email,
                new.first_name,
                new.last_name,
                new.course_id,
                new.professor_email,
                new.grade,
                checkmygrade::records::parse_marks(&new.marks)?,
            );
            students.save(&student, false)?;
        }
        StudentCommand::Search { email } => match students.search(&email)? {
            Some(s) => println!("{:?}", s),
            None => println!("Student {} not found.", email),
        },
        StudentCommand::Update {
            email,
            course,
            grade,
            marks,
        } => {
            let changes = StudentUpdate {
                course_id: course,
                grade,
                marks: marks
                    .as_deref()
                    .map(checkmygrade::records::parse_marks)
                    .transpose()?,
            };
            if !students.update(&email, &changes)? {
                println!("Student {} not found.", email);
            }
        }
        StudentCommand::Delete { email } => {
            students.delete(&email)?;
        }
        StudentCommand::Sort { by, desc } => {
            let order = SortOrder::from_ascending(!desc);
            let sorted = match by {
                SortKey::Marks => students.sort_by_marks(order)?,
                SortKey::Email => students.sort_by_email(order)?,
                SortKey::Name => students.sort_by_name(order)?,
            };
            for s in sorted {
                println!("{},{},{},{},{}", s.email, s.full_name(), s.course_id, s.grade, s.marks);
            }
        }
    }
    Ok(())
}

fn run_course(book: &GradeBook, cmd: CourseCommand) -> Result<()> {
    let courses = book.courses();
    match cmd {
        CourseCommand::Add {
            course_id,
            course_name,
            description,
        } => {
            courses.add(&Course::new(course_id, course_name, description))?;
        }
        CourseCommand::Update {
            course_id,
            name,
            description,
        } => {
            let changes = CourseUpdate {
                course_name: name,
                description,
            };
            if !courses.update(&course_id, &changes)? {
                println!("Course {} not found.", course_id);
            }
        }
        CourseCommand::Delete { course_id } => {
            courses.delete(&course_id)?;
        }
        CourseCommand::List => {
            for c in courses.all()? {
                println!("{}: {} - {}", c.course_id, c.course_name, c.description);
            }
        }
    }
    Ok(())
}

fn run_professor(book: &GradeBook, cmd: ProfessorCommand) -> Result<()> {
    let professors = book.professors();
    match cmd {
        ProfessorCommand::Add {
            email,
            name,
            rank,
            course_id,
        } => {
            professors.add(&Professor::new(email, name, rank, course_id))?;
        }
        ProfessorCommand::Rank { email, rank } => {
            if professors.modify_rank(&email, &rank)? == 0 {
                println!("Professor {} not found.", email);
            }
        }
        ProfessorCommand::Delete { email } => {
            professors.delete(&email)?;
        }
        ProfessorCommand::List => {
            for p in professors.all()? {
                println!("{}: {} ({}) - {}", p.email, p.name, p.rank, p.course_id);
            }
        }
    }
    Ok(())
}

fn run_login(book: &GradeBook, cmd: LoginCommand) -> Result<()> {
    let logins = book.logins();
    match cmd {
        LoginCommand::Register {
            email,
            password,
            role,
        } => {
            let role: Role = role.parse()?;
            if !logins.register(&email, &password, role)? {
                println!("Login {} already exists.", email);
            }
        }
        LoginCommand::Verify { email, password } => match logins.authenticate(&email, &password)? {
            Some(role) => println!("Login valid ({}).", role),
            None => println!("Invalid email or password."),
        },
    }
    Ok(())
}
