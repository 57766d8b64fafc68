use indoc::indoc;

/// Core forum schema, in the style of the generated hosted-platform migrations
pub const INITIAL_SCHEMA: &str = indoc! {r#"
    /*
      # Initial forum schema

      1. New Tables
        - `communities` (id, name, description)
        - `posts` (id, title, content, community_id)
      2. Security
        - Enable RLS on both tables; policies use `auth.uid()`; ordinary ; text
    */

    CREATE TABLE IF NOT EXISTS communities (
      id bigserial PRIMARY KEY,
      name text NOT NULL UNIQUE,
      description text,
      created_at timestamptz DEFAULT now()
    );

    CREATE TABLE IF NOT EXISTS posts (
      id bigserial PRIMARY KEY,
      title text NOT NULL,
      content text NOT NULL, -- body text; may include markdown
      image_url text,
      community_id bigint REFERENCES communities(id),
      created_at timestamptz DEFAULT now()
    );

    ALTER TABLE communities ENABLE ROW LEVEL SECURITY;
    ALTER TABLE posts ENABLE ROW LEVEL SECURITY;
"#};

/// A plpgsql function whose body contains several semicolons
pub const POSTS_WITH_COUNTS_FUNCTION: &str = indoc! {r#"
    -- Aggregate likes and comments per post
    CREATE OR REPLACE FUNCTION get_posts_with_counts()
    RETURNS TABLE (
      id bigint,
      title text,
      like_count bigint,
      comment_count bigint
    ) AS $$
    BEGIN
      RETURN QUERY
      SELECT p.id, p.title,
        (SELECT count(*) FROM votes v WHERE v.post_id = p.id),
        (SELECT count(*) FROM comments c WHERE c.post_id = p.id)
      FROM posts p
      ORDER BY p.created_at DESC;
    END;
    $$ LANGUAGE plpgsql;

    GRANT EXECUTE ON FUNCTION get_posts_with_counts() TO anon, authenticated;
"#};

/// Threaded comments plus a trigger function
pub const COMMENTS_AND_TRIGGER: &str = indoc! {r#"
    CREATE TABLE IF NOT EXISTS comments (
      id bigserial PRIMARY KEY,
      post_id bigint NOT NULL REFERENCES posts(id) ON DELETE CASCADE,
      parent_comment_id bigint REFERENCES comments(id) ON DELETE CASCADE,
      content text NOT NULL,
      created_at timestamptz DEFAULT now()
    );

    CREATE FUNCTION touch_post()
    RETURNS trigger
    LANGUAGE plpgsql
    AS $$
    BEGIN
      UPDATE posts SET created_at = created_at WHERE id = NEW.post_id;
      RETURN NEW;
    END;
    $$;

    CREATE TRIGGER comments_touch_post
      AFTER INSERT ON comments
      FOR EACH ROW EXECUTE FUNCTION touch_post();
"#};

/// Anonymous block guarding a policy creation
pub const DO_BLOCK: &str = indoc! {r#"
    DO $$
    BEGIN
      IF NOT EXISTS (SELECT 1 FROM pg_policies WHERE policyname = 'Anyone can read posts') THEN
        CREATE POLICY "Anyone can read posts" ON posts FOR SELECT USING (true);
      END IF;
    END
    $$;

    CREATE INDEX IF NOT EXISTS posts_community_id_idx ON posts (community_id);
"#};

/// Only comments: nothing to execute
pub const COMMENT_ONLY: &str = indoc! {r#"
    /*
      # Placeholder migration
    */
    -- intentionally empty
"#};

/// Sample communities for a fresh database
pub const SAMPLE_COMMUNITIES: &str = indoc! {r#"
    -- Starter communities shown on the home page
    INSERT INTO communities (name, description) VALUES
      ('Technology', 'Discuss the latest in tech, programming, and innovation'),
      ('Gaming', 'Share your gaming experiences, reviews, and discussions'),
      ('Science', 'Explore scientific discoveries, research, and theories'),
      ('Art & Design', 'Showcase creative work and discuss design principles'),
      ('Music', 'Share and discuss all genres of music')
    ON CONFLICT (name) DO NOTHING;
"#};

/// A welcome post per community, depends on the communities existing
pub const WELCOME_POSTS: &str = indoc! {r#"
    INSERT INTO posts (title, content, community_id)
    SELECT 'Welcome to ' || name, 'Say hello!', id FROM communities;

    UPDATE communities SET description = trim(description);
"#};
